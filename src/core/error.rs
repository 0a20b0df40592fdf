use thiserror::Error;

use crate::core::types::Position;

/// Failures that stop classification of a single sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Duplicate barcode position: {0}")]
    DuplicatePosition(Position),

    #[error("Region '{0}' has evidence but no configured threshold")]
    UnknownRegion(String),

    #[error("Region '{region}' configured with conflicting thresholds {first} and {second}")]
    ConflictingThreshold {
        region: String,
        first: u64,
        second: u64,
    },

    #[error("Region '{0}' passed its threshold but is missing from the priority order")]
    RegionNotPrioritised(String),

    #[error("No allele evidence for barcode position {position}")]
    EvidenceMissing { position: Position },

    #[error(
        "Barcode has {ambiguous} ambiguous positions, exceeding the expansion limit of {limit}"
    )]
    ExpansionLimitExceeded { ambiguous: usize, limit: usize },
}

impl ProfileError {
    /// Whether this error stems from configuration rather than sample data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::DuplicatePosition(_)
                | Self::UnknownRegion(_)
                | Self::ConflictingThreshold { .. }
                | Self::RegionNotPrioritised(_)
        )
    }
}
