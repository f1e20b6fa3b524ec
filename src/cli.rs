//! CLI entry for apporte: parses flags, obtains the input, resolves it against
//! the rule scopes and dispatches the winning command.

use std::{env, path::PathBuf};

use clap::Parser;
use colored::Colorize;

use crate::{
    command::{explain, input},
    internal::{
        dispatch::{Dispatcher, platform_dispatcher},
        error::ApporteError,
        resolve::resolve,
    },
};

#[derive(Parser, Debug)]
#[command(
    name = "apporte",
    about = "Open anything: match the input against regex rules and run the rule's command",
    version
)]
pub struct Cli {
    /// Prioritized config path, consulted before any directory rules (repeatable)
    #[arg(short, long = "config", value_name = "PATH")]
    pub config: Vec<PathBuf>,

    /// Show details without dispatching
    #[arg(short, long)]
    pub explain: bool,

    /// Show details and dispatch
    #[arg(short, long)]
    pub verbose: bool,

    /// Input to match against
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<String>,

    /// Input to match against, when --input is not given. Read from stdin if
    /// neither is present.
    #[arg(value_name = "INPUT")]
    pub target: Option<String>,
}

/// Parse arguments and run. Returns the process exit code.
/// - `args`: parse from command line if it's `None`, otherwise parse from the given args
pub fn parse(args: Option<&[&str]>) -> Result<i32, ApporteError> {
    let cli = match args {
        Some(args) => {
            Cli::try_parse_from(args).map_err(|e| ApporteError::InvalidArgument(e.to_string()))?
        }
        None => Cli::parse(),
    };
    let dispatcher = platform_dispatcher();
    execute(cli, dispatcher.as_ref())
}

/// Run one invocation with an explicit dispatcher.
pub fn execute(cli: Cli, dispatcher: &dyn Dispatcher) -> Result<i32, ApporteError> {
    let input = input::select_input(
        cli.input.as_deref(),
        cli.target.as_deref(),
        input::read_piped_stdin,
    )?;

    let start = env::current_dir()?;
    let resolution = resolve(&input, &cli.config, &start)?;

    if !resolution.diagnostics.is_empty() {
        eprintln!(
            "{}\n{}",
            "Warnings while loading rules:".yellow(),
            resolution.diagnostics
        );
    }

    let Some(selected) = resolution.winner() else {
        println!("No rules matched.");
        return Ok(0);
    };
    tracing::debug!(
        rank = selected.rank,
        source = %selected.source.display(),
        "selected rule"
    );

    if cli.explain || cli.verbose {
        println!("{}", explain::render(&input, &resolution));
    }
    if cli.explain {
        return Ok(0);
    }

    Ok(dispatcher.dispatch(selected.argv())?)
}

/// Catches clap definition mistakes (duplicate shorts, bad value names) at test time.
#[test]
fn verify_cli() {
    use clap::CommandFactory;

    Cli::command().debug_assert()
}
