use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// What to do when the `Frames:` line disagrees with the number of complete frames present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameCountPolicy {
    Ignore,
    #[default]
    Warn,
    Strict,
}

/// Settings applied while parsing a motion-capture file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ParseConfig {
    pub frame_count_policy: FrameCountPolicy,
    /// Replaces the frame time read from the file.
    pub frame_time_override: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl ParseConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: ParseConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.frame_time_override {
            Some(t) if !t.is_finite() || t <= 0.0 => Err(ConfigError::InvalidValue {
                field: "frame-time-override",
                reason: format!("must be a finite positive number, got {t}"),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct ParseConfigBuilder {
    frame_count_policy: Option<FrameCountPolicy>,
    frame_time_override: Option<f64>,
}

impl ParseConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count_policy(mut self, policy: FrameCountPolicy) -> Self {
        self.frame_count_policy = Some(policy);
        self
    }

    pub fn frame_time_override(mut self, frame_time: f64) -> Self {
        self.frame_time_override = Some(frame_time);
        self
    }

    pub fn build(self) -> Result<ParseConfig, ConfigError> {
        let config = ParseConfig {
            frame_count_policy: self.frame_count_policy.unwrap_or_default(),
            frame_time_override: self.frame_time_override,
        };
        config.validate()?;
        Ok(config)
    }
}
