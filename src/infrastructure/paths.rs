//! Plugin data locations inside the Zellij sandbox.
//!
//! The host filesystem is mounted under `/host`, which normally resolves to
//! the directory Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Returns the data directory, `/host/.local/share/zellij/popcorn`.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/popcorn"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("popcorn")
}

/// Path of the persisted key-value store.
#[must_use]
pub fn store_file() -> PathBuf {
    get_data_dir().join(STORE_FILE_NAME)
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use popcorn::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
