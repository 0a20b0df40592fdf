use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::error::ProfileError;
use crate::utils::validation::MAX_AMBIGUOUS_CEILING;

/// Minimum total read depth required to call a barcode position
pub const DEFAULT_MIN_DEPTH: u64 = 10;

/// Fraction of depth the majority allele must strictly exceed
pub const DEFAULT_MIN_FRACTION: f64 = 0.8;

/// Maximum number of `N` positions a barcode may carry and still be expanded
pub const DEFAULT_MAX_AMBIGUOUS: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ProfileError),
}

/// Thresholds for the consensus caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallingConfig {
    pub min_depth: u64,
    pub min_fraction: f64,
}

impl Default for CallingConfig {
    fn default() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            min_fraction: DEFAULT_MIN_FRACTION,
        }
    }
}

/// Settings shared by every stage of the profiler.
///
/// Loaded from a JSON file where every field is optional:
///
/// ```json
/// {
///   "min_depth": 10,
///   "min_fraction": 0.8,
///   "max_ambiguous_positions": 10,
///   "geoclassification_order": ["Africa", "Asia", "Oceania"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    #[serde(flatten)]
    pub calling: CallingConfig,

    pub max_ambiguous_positions: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoclassification_order: Option<Vec<String>>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            calling: CallingConfig::default(),
            max_ambiguous_positions: DEFAULT_MAX_AMBIGUOUS,
            geoclassification_order: None,
        }
    }
}

impl ProfilerConfig {
    /// Load and validate a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the priority order for duplicates
    pub fn validate(&self) -> Result<(), ProfileError> {
        let fraction = self.calling.min_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(ProfileError::Configuration(format!(
                "min_fraction must be in [0, 1), got {fraction}"
            )));
        }

        if self.max_ambiguous_positions > MAX_AMBIGUOUS_CEILING {
            return Err(ProfileError::Configuration(format!(
                "max_ambiguous_positions must be at most {MAX_AMBIGUOUS_CEILING}, got {}",
                self.max_ambiguous_positions
            )));
        }

        if let Some(order) = &self.geoclassification_order {
            for (i, region) in order.iter().enumerate() {
                if order[..i].contains(region) {
                    return Err(ProfileError::Configuration(format!(
                        "Region '{region}' listed twice in geoclassification_order"
                    )));
                }
            }
        }

        Ok(())
    }
}
