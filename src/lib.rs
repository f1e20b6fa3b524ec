//! apporte: resolve a path, URL or token against prioritized regex rules and
//! run the command of the rule that wins.

pub mod cli;
pub mod command;
pub mod internal;
pub mod utils;
