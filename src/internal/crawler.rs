//! Enumerates rule scopes in priority order and merges their rules.
//!
//! Priority, highest first:
//! 1. explicit override paths, in the order given
//! 2. `.apporte.toml` in the start directory, then each parent up to the root
//! 3. the user-global `.apporte.toml` in the platform config directory

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use path_absolutize::Absolutize;
use tracing::debug;

use super::{error::Diagnostics, loader::load_scope, rule::CompiledRule};
use crate::utils::path;

/// The set of scopes one run consults.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    start: PathBuf,
    overrides: Vec<PathBuf>,
    user_config: Option<PathBuf>,
}

/// Accumulator threaded through one crawl.
#[derive(Debug, Default)]
struct CrawlState {
    visited: HashSet<PathBuf>,
    next_rank: usize,
    rules: Vec<CompiledRule>,
    diagnostics: Diagnostics,
}

impl CrawlState {
    /// Load `scope` unless it was seen before. Ranks continue from the number
    /// of rules loaded so far.
    fn visit(&mut self, scope: PathBuf) {
        if !self.visited.insert(scope.clone()) {
            debug!(scope = %scope.display(), "scope already visited");
            return;
        }
        let (rules, diagnostics) = load_scope(&scope, self.next_rank);
        self.next_rank += rules.len();
        self.rules.extend(rules);
        self.diagnostics.extend(diagnostics);
    }
}

impl ConfigTree {
    /// Scopes for a run started in `start`, with the platform's user-global file.
    pub fn new<P: AsRef<Path>>(start: &Path, overrides: &[P]) -> Self {
        Self {
            start: start.to_path_buf(),
            overrides: overrides.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            user_config: path::user_config(),
        }
    }

    /// Replace the user-global scope; `None` disables it.
    pub fn with_user_config(mut self, user_config: Option<PathBuf>) -> Self {
        self.user_config = user_config;
        self
    }

    /// Scope paths in priority order, before deduplication.
    pub fn scopes(&self) -> Vec<PathBuf> {
        let start = match self.start.absolutize() {
            Ok(abs) => abs.into_owned(),
            Err(_) => self.start.clone(),
        };
        let mut scopes: Vec<PathBuf> = self
            .overrides
            .iter()
            .map(|p| normalize(p, &start))
            .collect();

        let mut dir = Some(start.as_path());
        while let Some(current) = dir {
            scopes.push(path::scope_in(current));
            dir = current.parent();
        }

        if let Some(user) = &self.user_config {
            scopes.push(normalize(user, &start));
        }
        scopes
    }

    /// Load every scope and return the merged rules, ordered by ascending rank,
    /// together with all load problems found on the way.
    pub fn crawl(&self) -> (Vec<CompiledRule>, Diagnostics) {
        let mut state = CrawlState::default();
        for scope in self.scopes() {
            state.visit(scope);
        }
        debug!(
            rules = state.rules.len(),
            scopes = state.visited.len(),
            problems = state.diagnostics.len(),
            "crawled config tree"
        );
        (state.rules, state.diagnostics)
    }
}

/// Crawl from `start` with the given override paths and the user-global scope.
pub fn crawl<P: AsRef<Path>>(start: &Path, overrides: &[P]) -> (Vec<CompiledRule>, Diagnostics) {
    ConfigTree::new(start, overrides).crawl()
}

/// Absolute, lexically normalized form of `p`, resolving relative paths against `base`.
fn normalize(p: &Path, base: &Path) -> PathBuf {
    match p.absolutize_from(base) {
        Ok(abs) => abs.into_owned(),
        Err(_) => p.to_path_buf(),
    }
}
