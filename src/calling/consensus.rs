use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::core::barcode::BarcodeSequence;
use crate::core::config::CallingConfig;
use crate::core::error::ProfileError;
use crate::core::evidence::{AlleleEvidence, EvidenceTable};
use crate::core::types::{ConsensusSymbol, Position};

/// Helper function to convert a read count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Why a position was, or was not, called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Called,
    LowDepth,
    NoMajority,
}

/// Call detail for one barcode position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCall {
    pub position: Position,
    pub depth: u64,
    /// Best-supported nucleotide, whether or not it was called
    pub majority: Option<ConsensusSymbol>,
    pub fraction: f64,
    pub symbol: ConsensusSymbol,
    pub status: CallStatus,
}

/// Call one position from its allele evidence.
///
/// Positions below `min_depth` are `N`. Otherwise the best-supported nucleotide
/// is called when its share of the total depth is strictly greater than
/// `min_fraction`, and `N` is emitted otherwise.
pub fn call_position(
    position: &Position,
    evidence: &AlleleEvidence,
    config: &CallingConfig,
) -> PositionCall {
    let depth = evidence.total();
    let majority = evidence.majority_nucleotide();
    let fraction = match majority {
        Some((_, count)) if depth > 0 => count_to_f64(count) / count_to_f64(depth),
        _ => 0.0,
    };

    let status = if depth < config.min_depth {
        CallStatus::LowDepth
    } else if majority.is_some() && fraction > config.min_fraction {
        CallStatus::Called
    } else {
        CallStatus::NoMajority
    };

    let symbol = match (status, majority) {
        (CallStatus::Called, Some((symbol, _))) => symbol,
        _ => ConsensusSymbol::N,
    };

    PositionCall {
        position: position.clone(),
        depth,
        majority: majority.map(|(s, _)| s),
        fraction,
        symbol,
        status,
    }
}

/// A called barcode with its per-position detail
#[derive(Debug, Clone, Serialize)]
pub struct BarcodeCall {
    pub barcode: BarcodeSequence,
    pub calls: Vec<PositionCall>,
}

/// Reduces allele evidence at a fixed, ordered panel of positions to a barcode
#[derive(Debug, Clone)]
pub struct ConsensusCaller {
    positions: Vec<Position>,
    config: CallingConfig,
}

impl ConsensusCaller {
    /// Create a caller for an ordered position panel.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::DuplicatePosition` if a position is listed twice,
    /// or `ProfileError::Configuration` for an empty panel.
    pub fn new(positions: Vec<Position>, config: CallingConfig) -> Result<Self, ProfileError> {
        if positions.is_empty() {
            return Err(ProfileError::Configuration(
                "Barcode panel has no positions".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(positions.len());
        for position in &positions {
            if !seen.insert(position) {
                return Err(ProfileError::DuplicatePosition(position.clone()));
            }
        }

        Ok(Self { positions, config })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Call every configured position, in panel order.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EvidenceMissing` for the first configured position
    /// with no evidence entry at all.
    pub fn call(&self, evidence: &EvidenceTable) -> Result<BarcodeCall, ProfileError> {
        let mut calls = Vec::with_capacity(self.positions.len());

        for position in &self.positions {
            let allele_evidence =
                evidence
                    .get(position)
                    .ok_or_else(|| ProfileError::EvidenceMissing {
                        position: position.clone(),
                    })?;

            let call = call_position(position, allele_evidence, &self.config);
            if call.status != CallStatus::Called {
                debug!(
                    position = %call.position,
                    depth = call.depth,
                    fraction = call.fraction,
                    status = ?call.status,
                    "Position not called"
                );
            }
            calls.push(call);
        }

        let barcode = BarcodeSequence::new(calls.iter().map(|c| c.symbol).collect());
        debug!(barcode = %barcode, "Called barcode");

        Ok(BarcodeCall { barcode, calls })
    }
}
