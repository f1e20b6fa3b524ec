//! Loads one configuration scope (a `.apporte.toml` file) into compiled rules.

use std::{io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::debug;

use super::{
    error::{Diagnostics, LoadError, RuleError},
    rule::{CompiledRule, RawRule},
};

/// Top-level shape of a scope file. Records are kept as raw TOML values so that
/// one malformed record is reported on its own instead of failing the file.
#[derive(Debug, Default, Deserialize)]
struct ScopeFile {
    #[serde(default)]
    rule: Vec<toml::Value>,
}

/// Load every valid rule of the scope at `path`, ranking them from `base_rank`.
///
/// A missing file yields no rules and no diagnostics. Unreadable or unparsable
/// files and rejected records are reported through the returned [`Diagnostics`];
/// rules that did compile are returned regardless.
pub fn load_scope(path: &Path, base_rank: usize) -> (Vec<CompiledRule>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(scope = %path.display(), "no rule file");
            return (Vec::new(), diagnostics);
        }
        Err(e) => {
            diagnostics.push(LoadError::ScopeUnreadable {
                scope: path.to_path_buf(),
                reason: format!("failed to read file: {e}"),
            });
            return (Vec::new(), diagnostics);
        }
    };

    let file: ScopeFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            diagnostics.push(LoadError::ScopeUnreadable {
                scope: path.to_path_buf(),
                reason: format!("failed to parse TOML: {}", e.message()),
            });
            return (Vec::new(), diagnostics);
        }
    };

    let mut rules = Vec::with_capacity(file.rule.len());
    for (index, value) in file.rule.into_iter().enumerate() {
        let compiled = RawRule::deserialize(value)
            .map_err(|e| RuleError::Malformed(e.message().to_string()))
            .and_then(|raw| CompiledRule::compile(raw, path, base_rank + rules.len()));

        match compiled {
            Ok(rule) => rules.push(rule),
            Err(reason) => diagnostics.push(LoadError::RuleInvalid {
                scope: path.to_path_buf(),
                index,
                reason,
            }),
        }
    }

    debug!(
        scope = %path.display(),
        loaded = rules.len(),
        rejected = diagnostics.len(),
        base_rank,
        "loaded rule file"
    );
    (rules, diagnostics)
}
