use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::calling::consensus::{ConsensusCaller, PositionCall};
use crate::catalog::store::HaplotypeCatalog;
use crate::core::barcode::BarcodeSequence;
use crate::core::config::ProfilerConfig;
use crate::core::error::ProfileError;
use crate::core::evidence::{EvidenceTable, GeoEvidenceRow};
use crate::core::types::{Position, RegionRule};
use crate::matching::engine::{HaplotypeMatches, MatchingEngine};
use crate::matching::expansion::AmbiguityExpander;
use crate::matching::region::{GeoClassification, RegionClassifier};

/// Everything known about one sample before profiling
#[derive(Debug, Clone)]
pub struct SampleInput {
    pub id: String,
    pub allele_counts: EvidenceTable,
    pub geo_evidence: Option<Vec<GeoEvidenceRow>>,
}

impl SampleInput {
    pub fn new(id: impl Into<String>, allele_counts: EvidenceTable) -> Self {
        Self {
            id: id.into(),
            allele_counts,
            geo_evidence: None,
        }
    }

    #[must_use]
    pub fn with_geo_evidence(mut self, rows: Vec<GeoEvidenceRow>) -> Self {
        self.geo_evidence = Some(rows);
        self
    }
}

/// Classification record for one sample
#[derive(Debug, Clone, Serialize)]
pub struct SampleProfile {
    pub id: String,
    pub barcode: BarcodeSequence,
    pub ambiguous_positions: usize,
    pub haplotype_matches: HaplotypeMatches,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoclassification: Option<GeoClassification>,
    pub position_calls: Vec<PositionCall>,
}

/// Per-sample result of a batch; failures never abort the other samples
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleOutcome {
    Profiled(SampleProfile),
    Failed { id: String, reason: String },
}

impl SampleOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Profiled(profile) => &profile.id,
            Self::Failed { id, .. } => id,
        }
    }

    pub fn profile(&self) -> Option<&SampleProfile> {
        match self {
            Self::Profiled(profile) => Some(profile),
            Self::Failed { .. } => None,
        }
    }
}

/// Runs the barcode and region stages for samples against fixed configuration
pub struct Profiler<'a> {
    caller: ConsensusCaller,
    engine: MatchingEngine<'a>,
    classifier: Option<RegionClassifier>,
    priority: Option<Vec<String>>,
}

impl<'a> Profiler<'a> {
    /// Create a profiler for a barcode panel and catalog.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings or a bad position panel.
    pub fn new(
        positions: Vec<Position>,
        catalog: &'a HaplotypeCatalog,
        config: &ProfilerConfig,
    ) -> Result<Self, ProfileError> {
        config.validate()?;
        let caller = ConsensusCaller::new(positions, config.calling)?;
        let expander = AmbiguityExpander::new(config.max_ambiguous_positions);

        if let Some(length) = catalog.haplotype_length() {
            if length != caller.positions().len() {
                return Err(ProfileError::Configuration(format!(
                    "Barcode panel has {} positions but catalog haplotypes have length {length}",
                    caller.positions().len()
                )));
            }
        }

        Ok(Self {
            caller,
            engine: MatchingEngine::with_expander(catalog, expander),
            classifier: None,
            priority: config.geoclassification_order.clone(),
        })
    }

    /// Enable region classification with the given rules.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rules are empty or conflicting.
    pub fn with_region_rules(mut self, rules: Vec<RegionRule>) -> Result<Self, ProfileError> {
        self.classifier = Some(RegionClassifier::new(rules, self.priority.clone())?);
        Ok(self)
    }

    /// Profile one sample.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure: missing evidence, an over-ambiguous
    /// barcode, or a region configuration problem. A barcode absent from the
    /// catalog is not an error.
    pub fn profile(&self, sample: &SampleInput) -> Result<SampleProfile, ProfileError> {
        let call = self.caller.call(&sample.allele_counts)?;
        let haplotype_matches = self.engine.match_barcode(&call.barcode)?;

        let geoclassification = match (&sample.geo_evidence, &self.classifier) {
            (Some(rows), Some(classifier)) => Some(classifier.classify(rows)?),
            (Some(_), None) => {
                return Err(ProfileError::Configuration(
                    "Geographic evidence supplied but no region rules configured".to_string(),
                ))
            }
            (None, _) => None,
        };

        Ok(SampleProfile {
            id: sample.id.clone(),
            ambiguous_positions: call.barcode.ambiguous_count(),
            barcode: call.barcode,
            haplotype_matches,
            geoclassification,
            position_calls: call.calls,
        })
    }

    /// Profile samples in parallel, isolating per-sample failures.
    ///
    /// Outcomes are returned in input order.
    pub fn profile_batch(&self, samples: &[SampleInput]) -> Vec<SampleOutcome> {
        let outcomes: Vec<SampleOutcome> = samples
            .par_iter()
            .map(|sample| self.outcome(&sample.id, self.profile(sample)))
            .collect();

        let failed = outcomes.iter().filter(|o| o.profile().is_none()).count();
        info!(
            samples = outcomes.len(),
            failed,
            "Batch profiling complete"
        );
        outcomes
    }

    /// Wrap a profiling result, logging failures
    pub fn outcome(&self, id: &str, result: Result<SampleProfile, ProfileError>) -> SampleOutcome {
        match result {
            Ok(profile) => SampleOutcome::Profiled(profile),
            Err(e) => {
                warn!(sample = id, error = %e, "Sample failed");
                SampleOutcome::Failed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
