//! Platform directories.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "am2rican5", "binrain")
}

/// Default location of `config.toml`.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory for the log file.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.cache_dir())
            .to_path_buf()
    })
}

/// Directory for session markers: the runtime directory, else the cache.
pub fn session_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        dirs.runtime_dir()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| dirs.cache_dir().join("sessions"))
    })
}
