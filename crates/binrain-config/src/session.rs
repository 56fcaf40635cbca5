//! Session-scoped "intro already shown" flag.
//!
//! A terminal has no browser session, so the flag is a marker file keyed by
//! a session id: `$BINRAIN_SESSION`, else `$TERM_SESSION_ID`, else the
//! parent process (normally the shell). A new shell gets the intro again.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write session flag {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove session flag {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session flag: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Contents of a marker file.
#[derive(Debug, Serialize, Deserialize)]
struct SeenRecord {
    session: String,
    seen_at: String,
}

/// Pick the session id from the available sources, most specific first.
pub fn session_id_from(
    explicit: Option<String>,
    terminal: Option<String>,
    parent_pid: Option<u32>,
) -> String {
    let raw = explicit
        .filter(|s| !s.trim().is_empty())
        .or_else(|| terminal.filter(|s| !s.trim().is_empty()))
        .or_else(|| parent_pid.map(|pid| format!("ppid-{pid}")))
        .unwrap_or_else(|| "default".to_string());

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn current_session_id() -> String {
    #[cfg(unix)]
    let parent = Some(std::os::unix::process::parent_id());
    #[cfg(not(unix))]
    let parent = None;

    session_id_from(
        std::env::var("BINRAIN_SESSION").ok(),
        std::env::var("TERM_SESSION_ID").ok(),
        parent,
    )
}

/// Marker recording that the intro played in this session.
#[derive(Debug, Clone)]
pub struct IntroSeenFlag {
    session: String,
    path: PathBuf,
}

impl IntroSeenFlag {
    /// Flag for the current terminal session, or `None` without a usable
    /// home directory.
    pub fn for_current_session() -> Option<Self> {
        let dir = crate::paths::session_dir()?;
        Some(Self::in_dir(&dir, &current_session_id()))
    }

    /// Flag for `session` stored under `dir`.
    pub fn in_dir(dir: &Path, session: &str) -> Self {
        Self {
            session: session.to_string(),
            path: dir.join(format!("intro-seen-{session}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the intro was already shown. Unreadable markers count as unset.
    pub fn is_set(&self) -> bool {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return false,
        };
        match serde_json::from_str::<SeenRecord>(&text) {
            Ok(record) => record.session == self.session,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "ignoring corrupt session flag");
                false
            }
        }
    }

    /// Persist the flag.
    pub fn set(&self) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let record = SeenRecord {
            session: self.session.clone(),
            seen_at: Local::now().to_rfc3339(),
        };
        let json = serde_json::to_string(&record)?;
        std::fs::write(&self.path, json).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), "intro marked as seen");
        Ok(())
    }

    /// Remove the flag so the intro plays again.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_precedence() {
        assert_eq!(
            session_id_from(Some("mine".into()), Some("term".into()), Some(42)),
            "mine"
        );
        assert_eq!(session_id_from(None, Some("term".into()), Some(42)), "term");
        assert_eq!(session_id_from(Some("  ".into()), None, Some(42)), "ppid-42");
        assert_eq!(session_id_from(None, None, None), "default");
    }

    #[test]
    fn test_session_id_is_filename_safe() {
        assert_eq!(
            session_id_from(Some("w0t0p0:AB/CD".into()), None, None),
            "w0t0p0_AB_CD"
        );
    }

    #[test]
    fn test_set_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let flag = IntroSeenFlag::in_dir(&dir.path().join("nested"), "s1");
        assert!(!flag.is_set());

        flag.set().unwrap();
        assert!(flag.is_set());

        flag.clear().unwrap();
        assert!(!flag.is_set());
        // Clearing twice is fine.
        flag.clear().unwrap();
    }

    #[test]
    fn test_sessions_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let first = IntroSeenFlag::in_dir(dir.path(), "one");
        let second = IntroSeenFlag::in_dir(dir.path(), "two");
        first.set().unwrap();
        assert!(first.is_set());
        assert!(!second.is_set());
    }

    #[test]
    fn test_corrupt_marker_counts_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let flag = IntroSeenFlag::in_dir(dir.path(), "s1");
        std::fs::write(flag.path(), "not json").unwrap();
        assert!(!flag.is_set());
    }
}
