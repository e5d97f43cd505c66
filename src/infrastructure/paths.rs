//! Filesystem locations used by the client.
//!
//! Everything the client persists lives in one data directory: the session file and
//! the rotating log. The directory comes from the configuration when set, otherwise
//! from the platform data directory.

use std::path::{Path, PathBuf};

/// Application directory name under the platform data directory.
const APP_DIR: &str = "mealshare";

/// File holding the persisted session.
pub const SESSION_FILE: &str = "session.json";

/// Log file written by the tracing subscriber.
pub const LOG_FILE: &str = "mealshare.log";

/// Returns the default data directory.
///
/// Resolves to `<platform data dir>/mealshare`, e.g. `~/.local/share/mealshare` on
/// Linux. Falls back to `./mealshare` when the platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or a `~` when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use mealshare::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/lib/mealshare"), PathBuf::from("/var/lib/mealshare"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Resolves the data directory from an optional configured value.
#[must_use]
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    configured.map_or_else(default_data_dir, expand_tilde)
}

#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

#[must_use]
pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}
