use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::error::ProfileError;
use crate::core::evidence::GeoEvidenceRow;
use crate::core::types::{RegionRule, UNASSIGNED};

/// Helper function to convert a threshold to f64 with explicit precision loss allowance
#[inline]
fn threshold_to_f64(threshold: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        threshold as f64
    }
}

/// Aggregated evidence for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSupport {
    pub region: String,
    pub threshold: u64,
    pub support: f64,
    pub passed: bool,
}

/// Final region call for a sample, with the sums behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoClassification {
    /// Assigned regions: one entry when a priority order resolves the call,
    /// `["Unassigned"]` when nothing passes under a priority order, and every
    /// passing region otherwise
    pub regions: Vec<String>,
    pub support: Vec<RegionSupport>,
}

impl GeoClassification {
    pub fn is_unassigned(&self) -> bool {
        self.regions.len() == 1 && self.regions[0] == UNASSIGNED
    }
}

/// Assigns a region from per-region evidence thresholds
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    rules: Vec<RegionRule>,
    priority: Option<Vec<String>>,
}

impl RegionClassifier {
    /// Build a classifier from raw rules and an optional priority order.
    ///
    /// Repeated identical rules collapse into one, keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::ConflictingThreshold` if a region is given two
    /// different thresholds, or `ProfileError::Configuration` if there are no rules.
    pub fn new(rules: Vec<RegionRule>, priority: Option<Vec<String>>) -> Result<Self, ProfileError> {
        if rules.is_empty() {
            return Err(ProfileError::Configuration(
                "No region rules configured".to_string(),
            ));
        }

        let mut distinct: Vec<RegionRule> = Vec::new();
        for rule in rules {
            match distinct.iter().find(|r| r.region == rule.region) {
                Some(existing) if existing.threshold != rule.threshold => {
                    return Err(ProfileError::ConflictingThreshold {
                        region: rule.region,
                        first: existing.threshold,
                        second: rule.threshold,
                    });
                }
                Some(_) => {}
                None => distinct.push(rule),
            }
        }

        Ok(Self {
            rules: distinct,
            priority,
        })
    }

    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }

    /// Classify a sample from its evidence rows.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnknownRegion` if a row names a region without a
    /// rule, or `ProfileError::RegionNotPrioritised` if several regions pass and
    /// one of them is missing from the priority order.
    pub fn classify(&self, rows: &[GeoEvidenceRow]) -> Result<GeoClassification, ProfileError> {
        let mut sums: HashMap<&str, f64> = HashMap::with_capacity(self.rules.len());
        for rule in &self.rules {
            sums.insert(rule.region.as_str(), 0.0);
        }

        for row in rows {
            let sum = sums
                .get_mut(row.region.as_str())
                .ok_or_else(|| ProfileError::UnknownRegion(row.region.clone()))?;
            *sum += row.support;
        }

        let support: Vec<RegionSupport> = self
            .rules
            .iter()
            .map(|rule| {
                let total = sums.get(rule.region.as_str()).copied().unwrap_or_default();
                RegionSupport {
                    region: rule.region.clone(),
                    threshold: rule.threshold,
                    support: total,
                    passed: total >= threshold_to_f64(rule.threshold),
                }
            })
            .collect();

        let passing: Vec<String> = support
            .iter()
            .filter(|s| s.passed)
            .map(|s| s.region.clone())
            .collect();

        debug!(passing = ?passing, "Regions passing threshold");

        let regions = match &self.priority {
            Some(order) => resolve_by_priority(passing, order)?,
            None => passing,
        };

        Ok(GeoClassification { regions, support })
    }
}

/// Collapse passing regions to a single call using a priority order
fn resolve_by_priority(passing: Vec<String>, order: &[String]) -> Result<Vec<String>, ProfileError> {
    match passing.len() {
        0 => Ok(vec![UNASSIGNED.to_string()]),
        1 => Ok(passing),
        _ => {
            let mut ranked = Vec::with_capacity(passing.len());
            for region in passing {
                let rank = order
                    .iter()
                    .position(|r| *r == region)
                    .ok_or_else(|| ProfileError::RegionNotPrioritised(region.clone()))?;
                ranked.push((rank, region));
            }
            ranked.sort_by_key(|(rank, _)| *rank);
            Ok(ranked.into_iter().take(1).map(|(_, region)| region).collect())
        }
    }
}
