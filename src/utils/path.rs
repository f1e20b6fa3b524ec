//! Path builders for rule scopes: the per-directory rule file and the user-global one.

use std::path::{Path, PathBuf};

/// File name looked up in every directory from the start directory to the root.
pub const CONFIG_FILE: &str = ".apporte.toml";

/// Rule file inside `dir`.
pub fn scope_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// The user-global rule file, `None` when the platform has no config directory.
pub fn user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| scope_in(&dir))
}
