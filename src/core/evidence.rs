use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{ConsensusSymbol, Position};

/// Read support per allele at one position, in the order alleles were first reported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlleleEvidence {
    counts: Vec<(String, u64)>,
}

impl AlleleEvidence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add support for an allele. Repeated alleles accumulate in place.
    ///
    /// Single-base alleles are case-insensitive: strand-aware counts reported
    /// as `A` and `a` pool into one `A` entry. Counts saturate at `u64::MAX`.
    pub fn add(&mut self, allele: impl Into<String>, count: u64) {
        let mut allele = allele.into();
        if ConsensusSymbol::parse(&allele).is_some() {
            allele.make_ascii_uppercase();
        }
        if let Some(entry) = self.counts.iter_mut().find(|(a, _)| *a == allele) {
            entry.1 = entry.1.saturating_add(count);
        } else {
            self.counts.push((allele, count));
        }
    }

    #[cfg(test)]
    pub fn with(mut self, allele: &str, count: u64) -> Self {
        self.add(allele, count);
        self
    }

    /// Total coverage: the sum of every allele count, including indels
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, (_, c)| acc.saturating_add(*c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(a, c)| (a.as_str(), *c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The nucleotide with the highest support.
    ///
    /// Only single-base A/C/G/T alleles are candidates. Among equal counts the
    /// allele reported first wins.
    pub fn majority_nucleotide(&self) -> Option<(ConsensusSymbol, u64)> {
        let mut best: Option<(ConsensusSymbol, u64)> = None;
        for (allele, count) in self.iter() {
            let Some(symbol) = ConsensusSymbol::parse(allele).filter(|s| s.is_nucleotide()) else {
                continue;
            };
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((symbol, count)),
            }
        }
        best
    }
}

/// Allele evidence for a sample, keyed by position
#[derive(Debug, Clone, Default)]
pub struct EvidenceTable {
    by_position: HashMap<Position, AlleleEvidence>,
}

impl EvidenceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: Position, allele: impl Into<String>, count: u64) {
        self.by_position
            .entry(position)
            .or_default()
            .add(allele, count);
    }

    pub fn insert(&mut self, position: Position, evidence: AlleleEvidence) {
        self.by_position.insert(position, evidence);
    }

    pub fn get(&self, position: &Position) -> Option<&AlleleEvidence> {
        self.by_position.get(position)
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

/// One unit of genotype evidence attributed to a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEvidenceRow {
    pub region: String,
    pub marker: String,
    pub support: f64,
}

impl GeoEvidenceRow {
    pub fn new(region: impl Into<String>, marker: impl Into<String>, support: f64) -> Self {
        Self {
            region: region.into(),
            marker: marker.into(),
            support,
        }
    }
}
