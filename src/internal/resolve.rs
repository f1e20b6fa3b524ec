//! The boundary used by the command line: crawl, match, expand.

use std::path::{Path, PathBuf};

use super::{
    crawler::ConfigTree,
    error::{Diagnostics, MatchError},
    matcher::MatchEngine,
    rule::CompiledRule,
    template,
};

/// Outcome of resolving one input.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Matched and expanded rules, ascending by rank.
    pub matched: Vec<CompiledRule>,
    /// Load problems, for the caller to report as warnings.
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// The rule to dispatch: the matched rule with the smallest rank.
    pub fn winner(&self) -> Option<&CompiledRule> {
        self.matched.first()
    }

    /// Matched rules that lost to the winner.
    pub fn runners_up(&self) -> &[CompiledRule] {
        self.matched.get(1..).unwrap_or_default()
    }

    pub fn is_no_match(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Configured pipeline from scope discovery to expanded matches.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: ConfigTree,
    engine: MatchEngine,
}

impl Resolver {
    pub fn new(tree: ConfigTree) -> Self {
        Self {
            tree,
            engine: MatchEngine::default(),
        }
    }

    pub fn with_engine(mut self, engine: MatchEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn resolve(&self, input: &str) -> Result<Resolution, MatchError> {
        let (rules, diagnostics) = self.tree.crawl();
        let mut matched = self.engine.match_all(input, rules)?;
        template::expand(&mut matched);
        Ok(Resolution {
            matched,
            diagnostics,
        })
    }
}

/// Resolve `input` against the scopes seen from `start`, with `overrides` taking
/// precedence over everything else.
pub fn resolve(
    input: &str,
    overrides: &[PathBuf],
    start: &Path,
) -> Result<Resolution, MatchError> {
    Resolver::new(ConfigTree::new(start, overrides)).resolve(input)
}
