use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::HaplotypeCatalog;
use crate::core::barcode::BarcodeSequence;
use crate::core::error::ProfileError;
use crate::matching::expansion::AmbiguityExpander;

/// One positive region weight of a matched haplotype
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HaplotypeMatch {
    pub haplotype: String,
    pub category: String,
    pub weight: f64,
}

/// Result of matching a sample against the catalog.
///
/// `NoMatch` is a valid outcome: the sample's barcode is simply not catalogued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HaplotypeMatches {
    NoMatch,
    Found {
        /// Matched haplotype sequences, in catalog order
        haplotypes: Vec<String>,
        /// Positive-weight rows of every matched record
        rows: Vec<HaplotypeMatch>,
    },
}

impl HaplotypeMatches {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    pub fn haplotypes(&self) -> &[String] {
        match self {
            Self::NoMatch => &[],
            Self::Found { haplotypes, .. } => haplotypes,
        }
    }

    pub fn rows(&self) -> &[HaplotypeMatch] {
        match self {
            Self::NoMatch => &[],
            Self::Found { rows, .. } => rows,
        }
    }
}

/// Matches barcodes against a haplotype catalog
pub struct MatchingEngine<'a> {
    catalog: &'a HaplotypeCatalog,
    expander: AmbiguityExpander,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with the default expansion cap
    pub fn new(catalog: &'a HaplotypeCatalog) -> Self {
        Self {
            catalog,
            expander: AmbiguityExpander::default(),
        }
    }

    /// Create a new matching engine with a custom expander
    pub fn with_expander(catalog: &'a HaplotypeCatalog, expander: AmbiguityExpander) -> Self {
        Self { catalog, expander }
    }

    /// Filter the catalog to records whose haplotype is among `expanded`, and
    /// decompose them into positive-weight rows.
    pub fn match_expanded<I, S>(&self, expanded: I) -> HaplotypeMatches
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let finder = CandidateFinder::new(self.catalog);
        let indices = finder.find_records(expanded);

        if indices.is_empty() {
            return HaplotypeMatches::NoMatch;
        }

        let mut haplotypes: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for idx in indices {
            let record = &self.catalog.records[idx];
            if !haplotypes.contains(&record.haplotype) {
                haplotypes.push(record.haplotype.clone());
            }
            rows.extend(record.positive_weights().map(|(category, weight)| HaplotypeMatch {
                haplotype: record.haplotype.clone(),
                category: category.to_string(),
                weight,
            }));
        }

        HaplotypeMatches::Found { haplotypes, rows }
    }

    /// Expand a barcode and match every expansion against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::ExpansionLimitExceeded` if the barcode is too
    /// ambiguous to expand, or `ProfileError::Configuration` if its length
    /// differs from the catalog's haplotypes.
    pub fn match_barcode(&self, barcode: &BarcodeSequence) -> Result<HaplotypeMatches, ProfileError> {
        if let Some(expected) = self.catalog.haplotype_length() {
            if expected != barcode.len() {
                return Err(ProfileError::Configuration(format!(
                    "Barcode has {} positions but catalog haplotypes have length {expected}",
                    barcode.len()
                )));
            }
        }

        let expansion = self.expander.iter(barcode)?;
        let matches = self.match_expanded(expansion);

        match &matches {
            HaplotypeMatches::NoMatch => info!(barcode = %barcode, "No catalog haplotype matches barcode"),
            HaplotypeMatches::Found { haplotypes, rows } => debug!(
                barcode = %barcode,
                haplotypes = haplotypes.len(),
                rows = rows.len(),
                "Matched catalog haplotypes"
            ),
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn make_test_catalog() -> HaplotypeCatalog {
        HaplotypeCatalog::from_delimited_text(
            "haplotype,Africa,Asia,Oceania,nsamples\n\
             AA,0.9,0.1,0.0,12\n\
             AC,0.0,0.0,-0.5,3\n\
             GG,0.0,1.0,0.0,7\n\
             AT,0.25,0.0,0.75,2\n",
            b',',
        )
        .unwrap()
    }

    fn barcode(s: &str) -> BarcodeSequence {
        BarcodeSequence::parse(s).unwrap()
    }

    #[test]
    fn test_match_expanded_filters_weights() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let expanded: BTreeSet<String> = ["AA".to_string()].into_iter().collect();
        let matches = engine.match_expanded(&expanded);

        assert_eq!(matches.haplotypes(), &["AA"]);
        assert_eq!(
            matches.rows(),
            &[
                HaplotypeMatch {
                    haplotype: "AA".to_string(),
                    category: "Africa".to_string(),
                    weight: 0.9
                },
                HaplotypeMatch {
                    haplotype: "AA".to_string(),
                    category: "Asia".to_string(),
                    weight: 0.1
                },
            ]
        );
    }

    #[test]
    fn test_match_barcode_with_ambiguity() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine.match_barcode(&barcode("AN")).unwrap();
        assert_eq!(matches.haplotypes(), &["AA", "AC", "AT"]);

        let categories: Vec<(&str, &str)> = matches
            .rows()
            .iter()
            .map(|r| (r.haplotype.as_str(), r.category.as_str()))
            .collect();
        assert_eq!(
            categories,
            vec![
                ("AA", "Africa"),
                ("AA", "Asia"),
                ("AT", "Africa"),
                ("AT", "Oceania")
            ]
        );
    }

    #[test]
    fn test_match_without_positive_weights_is_not_no_match() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine.match_barcode(&barcode("AC")).unwrap();
        assert!(!matches.is_no_match());
        assert_eq!(matches.haplotypes(), &["AC"]);
        assert!(matches.rows().is_empty());
    }

    #[test]
    fn test_no_match() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine.match_barcode(&barcode("TT")).unwrap();
        assert_eq!(matches, HaplotypeMatches::NoMatch);
        assert!(matches.rows().is_empty());
    }

    #[test]
    fn test_barcode_length_mismatch() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let err = engine.match_barcode(&barcode("AAA")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_expansion_limit_propagates() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::with_expander(&catalog, AmbiguityExpander::new(1));

        let err = engine.match_barcode(&barcode("NN")).unwrap_err();
        assert_eq!(
            err,
            ProfileError::ExpansionLimitExceeded {
                ambiguous: 2,
                limit: 1
            }
        );
    }

    #[test]
    fn test_serialized_status() {
        let json = serde_json::to_value(HaplotypeMatches::NoMatch).unwrap();
        assert_eq!(json["status"], "no_match");
    }
}
