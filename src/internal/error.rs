//! Error types for rule loading, matching, and dispatch.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Why a single rule record was rejected.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The `match` field is not a valid regular expression.
    #[error("invalid regex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The record could not be decoded (missing field, wrong output shape).
    #[error("invalid record: {0}")]
    Malformed(String),

    /// The output field resolved to zero tokens.
    #[error("empty output command")]
    EmptyOutput,
}

/// A non-fatal problem found while loading one configuration scope.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The scope exists but could not be read or parsed.
    #[error("error in {}: {reason}", .scope.display())]
    ScopeUnreadable { scope: PathBuf, reason: String },

    /// One record of an otherwise readable scope was skipped.
    #[error("error in {}: rule {index}: {reason}", .scope.display())]
    RuleInvalid {
        scope: PathBuf,
        index: usize,
        #[source]
        reason: RuleError,
    },
}

impl LoadError {
    /// The scope this problem belongs to.
    pub fn scope(&self) -> &Path {
        match self {
            LoadError::ScopeUnreadable { scope, .. } | LoadError::RuleInvalid { scope, .. } => {
                scope.as_path()
            }
        }
    }
}

/// Load problems accumulated over one run. Never aborts on the first entry.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<LoadError>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: LoadError) {
        self.0.push(err);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadError> {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Failure of the concurrent match stage.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("failed to start match workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure to launch the winning rule's command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The argument vector was empty.
    #[error("empty command")]
    InvalidCommand,

    /// The program could not be found on the search path.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The program was found but could not be executed.
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to obtain the input string.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No input provided. Use -i, positional arg, or pipe stdin.")]
    Missing,

    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

/// Top-level error of one invocation.
#[derive(Debug, Error)]
pub enum ApporteError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Error matching rules: {0}")]
    Match(#[from] MatchError),

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
