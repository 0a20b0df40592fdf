use serde::{Deserialize, Serialize};

/// One row of the haplotype catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaplotypeRecord {
    /// Concrete barcode sequence over A/C/G/T
    pub haplotype: String,

    /// Category (region) weights, in catalogue column order
    pub weights: Vec<(String, f64)>,

    /// Number of samples the haplotype was observed in; not a weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsamples: Option<u64>,
}

impl HaplotypeRecord {
    pub fn new(haplotype: impl Into<String>) -> Self {
        Self {
            haplotype: haplotype.into(),
            weights: Vec::new(),
            nsamples: None,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, category: impl Into<String>, weight: f64) -> Self {
        self.weights.push((category.into(), weight));
        self
    }

    #[must_use]
    pub fn with_nsamples(mut self, nsamples: u64) -> Self {
        self.nsamples = Some(nsamples);
        self
    }

    /// Categories carrying geographic signal (weight strictly above zero)
    pub fn positive_weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .map(|(c, w)| (c.as_str(), *w))
    }

    pub fn weight(&self, category: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, w)| *w)
    }
}
