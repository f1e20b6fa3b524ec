//! Rule records as read from a scope, and their compiled form.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use super::error::RuleError;

/// The `apporte` field of a rule: either one whitespace-delimited command line
/// or an explicit argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, expecting = "a string or a list of strings")]
pub enum RuleOutput {
    Single(String),
    Tokens(Vec<String>),
}

impl RuleOutput {
    /// Canonical token form. `Single` is split on runs of whitespace, `Tokens`
    /// is used verbatim so arguments may contain spaces.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            RuleOutput::Single(line) => line.split_whitespace().map(str::to_string).collect(),
            RuleOutput::Tokens(tokens) => tokens,
        }
    }
}

/// One `[[rule]]` table. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(rename = "apporte")]
    pub output: RuleOutput,
}

/// A rule ready for matching.
///
/// `pattern`, `source` and `rank` never change after compilation. `captures`
/// is filled by the match engine for matched rules only, and `template` is
/// rewritten in place by the expander.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub pattern: Regex,
    pub template: Vec<String>,
    pub source: PathBuf,
    pub rank: usize,
    pub captures: Vec<String>,
    /// Placeholders left literal because no such capture group exists.
    pub unresolved: Vec<String>,
}

impl CompiledRule {
    pub fn compile(raw: RawRule, source: &Path, rank: usize) -> Result<Self, RuleError> {
        let pattern = Regex::new(&raw.pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: raw.pattern.clone(),
            source,
        })?;

        let template = raw.output.into_tokens();
        if template.is_empty() {
            return Err(RuleError::EmptyOutput);
        }

        Ok(Self {
            pattern,
            template,
            source: source.to_path_buf(),
            rank,
            captures: Vec::new(),
            unresolved: Vec::new(),
        })
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_matched(&self) -> bool {
        !self.captures.is_empty()
    }

    /// The command line to dispatch: `[program, arg1, ...]`.
    pub fn argv(&self) -> &[String] {
        &self.template
    }
}
