//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `proxiwake.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use proxiwake_adapter_virtual::Script;
use proxiwake_domain::error::PatternError;
use proxiwake_domain::pattern::{Pattern, presets};
use proxiwake_domain::time::Millis;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Proximity sensor settings.
    pub sensor: SensorConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Session timing.
    pub session: SessionConfig,
    /// Custom gestures; the built-in presets are used when empty.
    pub patterns: Vec<PatternConfig>,
}

/// Proximity sensor configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Distance at and beyond which a reading counts as far.
    pub max_range: f32,
    /// Name of the virtual sensor script to replay.
    pub script: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Session configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long to keep sensing after the script's last reading.
    pub linger_ms: Millis,
}

/// A gesture declared in the config file.
///
/// The first step holds `start_near`, every following step flips the
/// state. Only the middle steps may set `max_ms`: the first step and the
/// terminal one are unbounded.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    pub start_near: bool,
    pub steps: Vec<StepConfig>,
}

/// One step of a [`PatternConfig`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StepConfig {
    pub min_ms: Millis,
    #[serde(default)]
    pub max_ms: Option<Millis>,
}

impl PatternConfig {
    /// Build the domain [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnboundedStep`] if the first or the terminal
    /// step sets `max_ms`, or [`ConfigError::Pattern`] if the declaration is
    /// otherwise malformed.
    pub fn build(&self) -> Result<Pattern, ConfigError> {
        let last = self.steps.len().saturating_sub(1);
        if let Some((step, _)) = self
            .steps
            .iter()
            .enumerate()
            .find(|&(index, config)| config.max_ms.is_some() && (index == 0 || index == last))
        {
            return Err(ConfigError::UnboundedStep {
                pattern: self.name.clone(),
                step,
            });
        }

        let mut builder = Pattern::builder(&self.name);
        for (index, step) in self.steps.iter().enumerate() {
            builder = match (index, step.max_ms) {
                (0, _) => builder.begin(self.start_near, step.min_ms),
                (i, _) if i == last => builder.end(step.min_ms),
                (_, Some(max)) => builder.then(step.min_ms, max),
                (_, None) => builder.then_unbounded(step.min_ms),
            };
        }
        Ok(builder.build()?)
    }
}

impl Config {
    /// Load configuration from `proxiwake.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("proxiwake.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PROXIWAKE_MAX_RANGE")
            && let Ok(max_range) = val.parse()
        {
            self.sensor.max_range = max_range;
        }
        if let Ok(val) = std::env::var("PROXIWAKE_SCRIPT") {
            self.sensor.script = val;
        }
        if let Ok(val) = std::env::var("PROXIWAKE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensor.max_range.is_finite() || self.sensor.max_range <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "max_range must be positive, got {}",
                self.sensor.max_range
            )));
        }
        if !Script::NAMES.contains(&self.sensor.script.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown script `{}`, expected one of {:?}",
                self.sensor.script,
                Script::NAMES
            )));
        }
        self.patterns()?;
        Ok(())
    }

    /// The gestures to recognise: the configured ones, or the presets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] or [`ConfigError::UnboundedStep`] if a
    /// configured pattern is malformed.
    pub fn patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        if self.patterns.is_empty() {
            return Ok(presets::defaults());
        }
        self.patterns
            .iter()
            .map(PatternConfig::build)
            .collect()
    }

    /// The script the virtual sensor replays.
    #[must_use]
    pub fn script(&self) -> Option<Script> {
        Script::by_name(&self.sensor.script, self.sensor.max_range)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range: 5.0,
            script: "wave".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "proxiwaked=info,proxiwake_app=info,proxiwake_adapter_virtual=info"
                .to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { linger_ms: 2000 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A configured pattern is malformed.
    #[error("invalid pattern")]
    Pattern(#[from] PatternError),
    /// `max_ms` set on a step that cannot be bounded.
    #[error("pattern `{pattern}`: step {step} cannot set max_ms, only middle steps are bounded")]
    UnboundedStep { pattern: String, step: usize },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
