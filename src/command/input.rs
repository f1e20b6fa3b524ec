//! Obtains the string to resolve: `--input`, then the positional argument,
//! then piped standard input.

use std::io::{self, IsTerminal, Read};

use crate::internal::error::InputError;

/// Pick the input by precedence. `stdin` is only consulted when neither
/// argument is given, and yields `None` when nothing is piped in.
pub fn select_input<F>(
    flag: Option<&str>,
    positional: Option<&str>,
    stdin: F,
) -> Result<String, InputError>
where
    F: FnOnce() -> io::Result<Option<String>>,
{
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }
    if let Some(value) = positional.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }
    match stdin()? {
        Some(piped) => {
            let trimmed = piped.trim();
            if trimmed.is_empty() {
                Err(InputError::Missing)
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(InputError::Missing),
    }
}

/// Whole standard input when it is a pipe or file, `None` on a terminal.
pub fn read_piped_stdin() -> io::Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(Some(buf))
}
