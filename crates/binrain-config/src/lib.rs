//! Configuration file and per-session state for binrain.

mod config;
mod paths;
mod session;

pub use config::{Config, ConfigError, IntroConfig, PageConfig, RainConfig};
pub use paths::{config_path, log_dir, session_dir};
pub use session::{IntroSeenFlag, SessionError, session_id_from};
