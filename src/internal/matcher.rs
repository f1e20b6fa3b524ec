//! Concurrent evaluation of compiled rules against one input.

use std::num::NonZeroUsize;

use rayon::prelude::*;
use tracing::debug;

use super::{error::MatchError, rule::CompiledRule};

/// Evaluates rules on a bounded worker pool.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    workers: usize,
}

impl Default for MatchEngine {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { workers }
    }
}

impl MatchEngine {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Return the rules whose pattern finds a match anywhere in `input`, with
    /// their captures filled in, ordered by ascending rank.
    ///
    /// Every rule is moved into exactly one worker, which is the only writer of
    /// its captures. Workers build local result lists that are concatenated
    /// after all of them finish; the final sort makes the output independent of
    /// completion order.
    pub fn match_all(
        &self,
        input: &str,
        rules: Vec<CompiledRule>,
    ) -> Result<Vec<CompiledRule>, MatchError> {
        let total = rules.len();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("apporte-match-{i}"))
            .build()?;

        let mut matched = pool.install(|| {
            rules
                .into_par_iter()
                .fold(Vec::new, |mut local, rule| {
                    if let Some(rule) = match_rule(input, rule) {
                        local.push(rule);
                    }
                    local
                })
                .reduce(Vec::new, |mut left, right| {
                    left.extend(right);
                    left
                })
        });
        matched.sort_by_key(|rule| rule.rank);

        debug!(total, matched = matched.len(), workers = self.workers, "matched rules");
        Ok(matched)
    }
}

/// Match with a pool sized to the available execution units.
pub fn match_all(input: &str, rules: Vec<CompiledRule>) -> Result<Vec<CompiledRule>, MatchError> {
    MatchEngine::default().match_all(input, rules)
}

/// Capture groups of the first match, index 0 being the whole match. Groups
/// that did not participate become empty strings.
fn match_rule(input: &str, mut rule: CompiledRule) -> Option<CompiledRule> {
    let caps = rule.pattern.captures(input)?;
    rule.captures = caps
        .iter()
        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
        .collect();
    Some(rule)
}
