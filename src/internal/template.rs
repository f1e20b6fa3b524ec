//! Substitution of `$N` capture placeholders into output templates.

use super::rule::CompiledRule;

/// Result of expanding one template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    pub text: String,
    /// Placeholders left as literal text because no such capture exists.
    pub unresolved: Vec<String>,
}

/// Rewrite the templates of matched rules in place. Unmatched rules are left alone.
pub fn expand(rules: &mut [CompiledRule]) {
    for rule in rules.iter_mut().filter(|r| r.is_matched()) {
        let mut unresolved = Vec::new();
        for token in rule.template.iter_mut() {
            let expanded = expand_token(token, &rule.captures);
            *token = expanded.text;
            for placeholder in expanded.unresolved {
                if !unresolved.contains(&placeholder) {
                    unresolved.push(placeholder);
                }
            }
        }
        rule.unresolved = unresolved;
    }
}

/// Replace every `$i` in `token` with `captures[i]` in a single left-to-right
/// pass, so text coming from a capture is never substituted again.
///
/// Lower indexes take precedence: when a `$` is followed by several digits,
/// the shortest prefix naming an existing capture wins and the remaining
/// digits stay literal, so `$10` is `captures[1]` followed by `0` even when
/// eleven captures exist. A placeholder naming no existing capture is kept
/// verbatim.
pub fn expand_token(token: &str, captures: &[String]) -> Expanded {
    let bytes = token.as_bytes();
    let mut text = String::with_capacity(token.len());
    let mut unresolved = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let digits_start = i + 1;
        let digits_end = bytes[digits_start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| digits_start + n);
        if digits_start == digits_end {
            i += 1;
            continue;
        }

        text.push_str(&token[literal_start..i]);
        let digits = &token[digits_start..digits_end];
        match shortest_index(digits, captures.len()) {
            Some((index, used)) => {
                text.push_str(&captures[index]);
                text.push_str(&digits[used..]);
            }
            None => {
                text.push_str(&token[i..digits_end]);
                unresolved.push(token[i..digits_end].to_string());
            }
        }
        i = digits_end;
        literal_start = i;
    }
    text.push_str(&token[literal_start..]);

    Expanded { text, unresolved }
}

/// Shortest canonical decimal prefix of `digits` below `available`, as
/// `(index, prefix_len)`.
fn shortest_index(digits: &str, available: usize) -> Option<(usize, usize)> {
    (1..=digits.len()).find_map(|len| {
        let prefix = &digits[..len];
        if len > 1 && prefix.starts_with('0') {
            return None;
        }
        prefix
            .parse::<usize>()
            .ok()
            .filter(|&index| index < available)
            .map(|index| (index, len))
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::internal::rule::{RawRule, RuleOutput};

    fn caps(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn matched_rule(output: RuleOutput, captures: &[&str]) -> CompiledRule {
        let mut rule = CompiledRule::compile(
            RawRule {
                pattern: ".".to_string(),
                output,
            },
            Path::new("/test/.apporte.toml"),
            0,
        )
        .unwrap();
        rule.captures = caps(captures);
        rule
    }

    #[test]
    fn test_github_shorthand() {
        let mut rules = vec![matched_rule(
            RuleOutput::Tokens(vec!["open".into(), "https://github.com/$1/$2".into()]),
            &["gh:torvalds/linux", "torvalds", "linux"],
        )];
        expand(&mut rules);
        assert_eq!(rules[0].template, vec!["open", "https://github.com/torvalds/linux"]);
        assert!(rules[0].unresolved.is_empty());
    }

    #[test]
    fn test_whole_match_placeholder() {
        let mut rules = vec![matched_rule(
            RuleOutput::Single("git show $0".into()),
            &["9a8c3f2"],
        )];
        expand(&mut rules);
        assert_eq!(rules[0].template, vec!["git", "show", "9a8c3f2"]);
    }

    #[test]
    fn test_out_of_range_placeholder_left_literal() {
        let mut rules = vec![matched_rule(
            RuleOutput::Single("echo $1-$2".into()),
            &["ab", "a"],
        )];
        expand(&mut rules);
        assert_eq!(rules[0].template, vec!["echo", "a-$2"]);
        assert_eq!(rules[0].unresolved, vec!["$2"]);
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let e = expand_token("$1/$1.$0", &caps(&["x", "y"]));
        assert_eq!(e.text, "y/y.x");
    }

    #[test]
    fn test_capture_text_not_resubstituted() {
        let e = expand_token("$1 $2", &caps(&["all", "$2", "two"]));
        assert_eq!(e.text, "$2 two");
        assert!(e.unresolved.is_empty());
    }

    #[test]
    fn test_multi_digit_indexes() {
        let many: Vec<String> = (0..11).map(|i| format!("<{i}>")).collect();
        assert_eq!(expand_token("$10", &many).text, "<1>0");
        assert_eq!(expand_token("$9/$10", &many).text, "<9>/<1>0");
        assert_eq!(expand_token("$12", &caps(&["a", "b"])).text, "b2");
        assert_eq!(expand_token("$01", &caps(&["a", "b"])).text, "a1");

        let e = expand_token("$35", &caps(&["a", "b"]));
        assert_eq!(e.text, "$35");
        assert_eq!(e.unresolved, vec!["$35"]);
    }

    #[test]
    fn test_dollar_without_digits_is_literal() {
        let e = expand_token("cost: $ and $x and $", &caps(&["m"]));
        assert_eq!(e.text, "cost: $ and $x and $");
        assert!(e.unresolved.is_empty());
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        let e = expand_token("→ $1 ü", &caps(&["m", "ñ"]));
        assert_eq!(e.text, "→ ñ ü");
    }

    #[test]
    fn test_unmatched_rules_untouched() {
        let mut rule = matched_rule(RuleOutput::Single("echo $0".into()), &[]);
        rule.captures.clear();
        let mut rules = vec![rule];
        expand(&mut rules);
        assert_eq!(rules[0].template, vec!["echo", "$0"]);
    }
}
