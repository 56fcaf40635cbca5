//! TOML configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use binrain_core::{ColorTheme, Glyphs, IntroTiming, RainSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rain section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Glyph cell size in pixels.
    pub cell_size: u16,
    /// Maximum glyphs per trail.
    pub trail_length: usize,
    /// Milliseconds between ticks.
    pub tick_ms: u64,
    /// Exactly two symbols.
    pub glyphs: String,
    /// Per-tick reset chance for columns past the bottom.
    pub reset_probability: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        let settings = RainSettings::default();
        let [a, b] = settings.glyphs.as_array();
        Self {
            cell_size: settings.cell_size,
            trail_length: settings.trail_length,
            tick_ms: settings.tick_interval.as_millis() as u64,
            glyphs: [a, b].iter().collect(),
            reset_probability: settings.reset_probability,
        }
    }
}

/// Intro section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Custom drawing file; the built-in signature is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing: Option<PathBuf>,
    pub reveal_delay_ms: u64,
    pub stroke_ms: u64,
    pub stagger_ms: u64,
    pub pause_ms: u64,
    pub fade_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        let timing = IntroTiming::default();
        Self {
            drawing: None,
            reveal_delay_ms: timing.reveal_delay.as_millis() as u64,
            stroke_ms: timing.stroke_duration.as_millis() as u64,
            stagger_ms: timing.stagger.as_millis() as u64,
            pause_ms: timing.pause.as_millis() as u64,
            fade_ms: timing.fade.as_millis() as u64,
        }
    }
}

/// Page section of the config file. Distances are in terminal rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Custom portfolio content file; built-in content is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,
    /// Rows before the about section where the hero starts shrinking.
    pub hero_start_rows: u16,
    /// Rows of scrolling over which the hero shrinks.
    pub hero_distance_rows: u16,
    /// Offset added to the scroll position when picking the active section.
    pub nav_offset_rows: u16,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            content: None,
            hero_start_rows: 20,
            hero_distance_rows: 15,
            nav_offset_rows: 5,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ColorTheme,
    pub rain: RainConfig,
    pub intro: IntroConfig,
    pub page: PageConfig,
}

impl Config {
    /// Load and validate the config at `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Render the config as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        if rain.cell_size == 0 {
            return Err(ConfigError::Invalid("rain.cell_size must be positive".into()));
        }
        if rain.trail_length == 0 {
            return Err(ConfigError::Invalid(
                "rain.trail_length must be positive".into(),
            ));
        }
        if rain.tick_ms == 0 {
            return Err(ConfigError::Invalid("rain.tick_ms must be positive".into()));
        }
        if Glyphs::parse(&rain.glyphs).is_none() {
            return Err(ConfigError::Invalid(format!(
                "rain.glyphs must be exactly two characters, got {:?}",
                rain.glyphs
            )));
        }
        if !(0.0..=1.0).contains(&rain.reset_probability) {
            return Err(ConfigError::Invalid(format!(
                "rain.reset_probability must be within 0..=1, got {}",
                rain.reset_probability
            )));
        }
        Ok(())
    }

    /// Rain settings for the animator.
    pub fn rain_settings(&self) -> RainSettings {
        RainSettings {
            cell_size: self.rain.cell_size,
            trail_length: self.rain.trail_length,
            tick_interval: Duration::from_millis(self.rain.tick_ms),
            glyphs: Glyphs::parse(&self.rain.glyphs).unwrap_or_default(),
            reset_probability: self.rain.reset_probability,
        }
    }

    /// Timings for the intro sequence.
    pub fn intro_timing(&self) -> IntroTiming {
        IntroTiming {
            reveal_delay: Duration::from_millis(self.intro.reveal_delay_ms),
            stroke_duration: Duration::from_millis(self.intro.stroke_ms),
            stagger: Duration::from_millis(self.intro.stagger_ms),
            pause: Duration::from_millis(self.intro.pause_ms),
            fade: Duration::from_millis(self.intro.fade_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_core() {
        let config = Config::default();
        assert_eq!(config.rain_settings(), RainSettings::default());
        assert_eq!(config.intro_timing(), IntroTiming::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"green\"").unwrap();
        writeln!(file, "[rain]").unwrap();
        writeln!(file, "glyphs = \"ab\"").unwrap();
        writeln!(file, "tick_ms = 33").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.theme, ColorTheme::Green);
        let rain = config.rain_settings();
        assert_eq!(rain.glyphs, Glyphs::new('a', 'b'));
        assert_eq!(rain.tick_interval, Duration::from_millis(33));
        assert_eq!(rain.cell_size, 16);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.rain.glyphs = "012".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.rain.reset_probability = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.rain.cell_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.rain.trail_length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_file_reports_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rain]\ntick_ms = 0").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rain\ncell_size = 3").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_to_toml_loads_back() {
        let mut config = Config::default();
        config.theme = ColorTheme::Amber;
        config.intro.drawing = Some(PathBuf::from("/tmp/sig.path"));
        let text = config.to_toml().unwrap();
        assert!(text.contains("[rain]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
