//! Path utilities for locating hubrecents data on the host.

use std::path::PathBuf;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "hubrecents";

/// Returns the default data directory for hubrecents storage.
///
/// This is the platform data directory (`~/.local/share` on Linux,
/// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows) joined with
/// `hubrecents`. Falls back to a relative `hubrecents` directory if the platform
/// directory cannot be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(APP_DIR), |dir| dir.join(APP_DIR))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or a tilde when no home directory is known, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use hubrecents::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
