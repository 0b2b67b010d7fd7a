//! Where the selection database and log file live.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "pageselect", "pageselect")
}

/// Default selection database, e.g. `~/.local/share/pageselect/selection.db`.
pub fn selection_db() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("selection.db"))
}

/// Log file for this run, e.g. `~/.cache/pageselect/latest.log`.
///
/// Creates the cache directory and keeps the previous run's log as
/// `previous.log`.
pub fn prepare_log_file() -> Option<PathBuf> {
    let cache = project_dirs()?.cache_dir().to_path_buf();
    fs::create_dir_all(&cache).ok()?;

    let latest = cache.join("latest.log");
    if latest.exists() {
        let _ = fs::rename(&latest, cache.join("previous.log"));
    }
    Some(latest)
}
