//! Runs the winning rule's command line.
//!
//! On unix the current process is replaced by the target program. Elsewhere
//! the program is spawned as a child with inherited standard streams and its
//! exit status is propagated.

use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::debug;

use super::error::DispatchError;

/// Launches an argument vector `[program, arg1, ...]`.
pub trait Dispatcher {
    /// Run `argv`. Returns the exit code to propagate when the calling process
    /// survives; a replacing dispatcher only returns on failure.
    fn dispatch(&self, argv: &[String]) -> Result<i32, DispatchError>;
}

/// Replaces the current process image (unix `execvp` semantics).
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecDispatcher;

#[cfg(unix)]
impl Dispatcher for ExecDispatcher {
    fn dispatch(&self, argv: &[String]) -> Result<i32, DispatchError> {
        use std::os::unix::process::CommandExt;

        let (program, args) = argv.split_first().ok_or(DispatchError::InvalidCommand)?;
        let binary = lookup(program)?;
        debug!(program = %binary.display(), ?args, "replacing process");

        let source = Command::new(&binary).arg0(program).args(args).exec();
        Err(DispatchError::Launch {
            program: program.clone(),
            source,
        })
    }
}

/// Spawns the program as a child and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnDispatcher;

impl Dispatcher for SpawnDispatcher {
    fn dispatch(&self, argv: &[String]) -> Result<i32, DispatchError> {
        let (program, args) = argv.split_first().ok_or(DispatchError::InvalidCommand)?;
        let binary = lookup(program)?;
        debug!(program = %binary.display(), ?args, "spawning process");

        let status = Command::new(&binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DispatchError::Launch {
                program: program.clone(),
                source,
            })?;
        debug!(%status, "child exited");
        // Killed by a signal: no code to forward.
        Ok(status.code().unwrap_or(1))
    }
}

/// The dispatcher matching the host's process model.
pub fn platform_dispatcher() -> Box<dyn Dispatcher> {
    #[cfg(unix)]
    {
        Box::new(ExecDispatcher)
    }
    #[cfg(not(unix))]
    {
        Box::new(SpawnDispatcher)
    }
}

fn lookup(program: &str) -> Result<PathBuf, DispatchError> {
    which::which(program).map_err(|_| DispatchError::CommandNotFound(program.to_string()))
}
