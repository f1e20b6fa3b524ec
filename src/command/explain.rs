//! Text shown by `--explain` and `--verbose`.

use crate::internal::resolve::Resolution;

/// Describe the winning rule, and the lower-priority rules that also matched.
/// Returns an empty string when nothing matched.
pub fn render(input: &str, resolution: &Resolution) -> String {
    let Some(winner) = resolution.winner() else {
        return String::new();
    };

    let mut out = format!(
        "Input\t\t: {input}\n\
         Matched\t\t: {}\n\
         From File\t: {}\n\
         Command\t\t: {:?}\n\
         Rank\t\t: {}\n\
         Groups\t\t: {:?}\n",
        winner.pattern_str(),
        winner.source.display(),
        winner.argv(),
        winner.rank,
        winner.captures,
    );
    if !winner.unresolved.is_empty() {
        out.push_str(&format!("Unresolved\t: {}\n", winner.unresolved.join(" ")));
    }

    let rest = resolution.runners_up();
    if !rest.is_empty() {
        out.push_str("Also matched\t:\n");
        for rule in rest {
            out.push_str(&format!(
                "  [{}] {} ({}) -> {:?}\n",
                rule.rank,
                rule.pattern_str(),
                rule.source.display(),
                rule.argv()
            ));
        }
    }
    out
}
