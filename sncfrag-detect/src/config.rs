use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the support of a start peak and a stop peak are combined into a candidate score.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFunction {
    #[default]
    Sum,
    Min,
    Product,
}

impl ScoreFunction {
    pub fn score(&self, start_support: u32, stop_support: u32) -> u64 {
        let (a, b) = (start_support as u64, stop_support as u64);
        match self {
            ScoreFunction::Sum => a + b,
            ScoreFunction::Min => a.min(b),
            ScoreFunction::Product => a * b,
        }
    }
}

impl std::str::FromStr for ScoreFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(ScoreFunction::Sum),
            "min" => Ok(ScoreFunction::Min),
            "product" => Ok(ScoreFunction::Product),
            other => Err(ConfigError::Invalid(format!(
                "unknown score function '{}', expected sum, min or product",
                other
            ))),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid detector configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

///
/// Tunable parameters of the fragment detection.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// min_fragment_length = 12
/// max_overlap_fraction = 0.3
/// score_function = "min"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Peaks with fewer boundaries than this are ignored
    pub min_peak_support: u32,
    /// Shortest fragment (inclusive length) that may be called
    pub min_fragment_length: u32,
    /// Longest fragment (inclusive length) a start peak may be paired into
    pub max_fragment_length: u32,
    /// Candidates sharing more than this fraction of the shorter one are merged
    pub max_overlap_fraction: f64,
    pub score_function: ScoreFunction,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            min_peak_support: 1,
            min_fragment_length: 4,
            max_fragment_length: 200,
            max_overlap_fraction: 0.5,
            score_function: ScoreFunction::Sum,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_peak_support == 0 {
            return Err(ConfigError::Invalid(
                "min_peak_support must be at least 1".to_string(),
            ));
        }
        if self.min_fragment_length == 0 {
            return Err(ConfigError::Invalid(
                "min_fragment_length must be at least 1".to_string(),
            ));
        }
        if self.min_fragment_length > self.max_fragment_length {
            return Err(ConfigError::Invalid(format!(
                "min_fragment_length ({}) exceeds max_fragment_length ({})",
                self.min_fragment_length, self.max_fragment_length
            )));
        }
        if !(0.0..=1.0).contains(&self.max_overlap_fraction) {
            return Err(ConfigError::Invalid(format!(
                "max_overlap_fraction must lie in [0, 1], got {}",
                self.max_overlap_fraction
            )));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for DetectorConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: DetectorConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
