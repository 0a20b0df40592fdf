use std::collections::BTreeSet;
use tracing::debug;

use crate::core::barcode::BarcodeSequence;
use crate::core::config::DEFAULT_MAX_AMBIGUOUS;
use crate::core::error::ProfileError;

/// Number of concrete sequences a barcode expands to (4^k for k `N`s)
///
/// Returns `None` if the count does not fit in a `usize`.
pub fn expansion_size(barcode: &BarcodeSequence) -> Option<usize> {
    let ambiguous = u32::try_from(barcode.ambiguous_count()).ok()?;
    4usize.checked_pow(ambiguous)
}

/// Lazy enumeration of a barcode's concrete sequences.
///
/// Sequences are produced in odometer order: the last position varies fastest,
/// and each `N` cycles through A, C, G, T.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    barcode: &'a BarcodeSequence,
    /// Current choice per position into that symbol's alternatives
    digits: Vec<usize>,
    remaining: usize,
}

impl<'a> Expansion<'a> {
    fn new(barcode: &'a BarcodeSequence, size: usize) -> Self {
        Self {
            barcode,
            digits: vec![0; barcode.len()],
            remaining: size,
        }
    }

    fn current(&self) -> String {
        self.barcode
            .symbols()
            .iter()
            .zip(&self.digits)
            .map(|(symbol, &d)| symbol.alternatives()[d].as_char())
            .collect()
    }

    fn advance(&mut self) {
        for (i, symbol) in self.barcode.symbols().iter().enumerate().rev() {
            let radix = symbol.alternatives().len();
            if radix == 1 {
                continue;
            }
            self.digits[i] += 1;
            if self.digits[i] < radix {
                return;
            }
            self.digits[i] = 0;
        }
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let sequence = self.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(sequence)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Expansion<'_> {}

/// Expands ambiguous barcodes, refusing those with too many `N`s
#[derive(Debug, Clone, Copy)]
pub struct AmbiguityExpander {
    max_ambiguous: usize,
}

impl Default for AmbiguityExpander {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AMBIGUOUS)
    }
}

impl AmbiguityExpander {
    pub fn new(max_ambiguous: usize) -> Self {
        Self { max_ambiguous }
    }

    /// Lazily enumerate every concrete sequence consistent with `barcode`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::ExpansionLimitExceeded` if the barcode has more
    /// `N` positions than the configured cap.
    pub fn iter<'a>(&self, barcode: &'a BarcodeSequence) -> Result<Expansion<'a>, ProfileError> {
        let ambiguous = barcode.ambiguous_count();
        let limit_error = ProfileError::ExpansionLimitExceeded {
            ambiguous,
            limit: self.max_ambiguous,
        };
        if ambiguous > self.max_ambiguous {
            return Err(limit_error);
        }
        let size = expansion_size(barcode).ok_or(limit_error)?;

        debug!(barcode = %barcode, ambiguous, size, "Expanding barcode");
        Ok(Expansion::new(barcode, size))
    }

    /// Materialize the full expansion set.
    ///
    /// # Errors
    ///
    /// Same as [`AmbiguityExpander::iter`].
    pub fn expand(&self, barcode: &BarcodeSequence) -> Result<BTreeSet<String>, ProfileError> {
        Ok(self.iter(barcode)?.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode(s: &str) -> BarcodeSequence {
        BarcodeSequence::parse(s).unwrap()
    }

    #[test]
    fn test_expand_scenario() {
        let expanded = AmbiguityExpander::default().expand(&barcode("AN")).unwrap();
        let expected: BTreeSet<String> = ["AA", "AC", "AG", "AT"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_no_ambiguity_is_identity() {
        let expanded: Vec<String> = AmbiguityExpander::default()
            .iter(&barcode("GATTACA"))
            .unwrap()
            .collect();
        assert_eq!(expanded, vec!["GATTACA".to_string()]);
    }

    #[test]
    fn test_size_is_four_to_the_k() {
        let expander = AmbiguityExpander::default();
        for (s, k) in [("A", 0), ("N", 1), ("NAN", 2), ("CNNGN", 3), ("NNNNN", 5)] {
            let b = barcode(s);
            let all: Vec<String> = expander.iter(&b).unwrap().collect();
            let unique: BTreeSet<&String> = all.iter().collect();
            assert_eq!(all.len(), 4usize.pow(k), "barcode {s}");
            assert_eq!(unique.len(), all.len(), "duplicates for barcode {s}");
            assert!(all.iter().all(|e| b.is_consistent_with(e)));
        }
    }

    #[test]
    fn test_odometer_order() {
        let all: Vec<String> = AmbiguityExpander::default()
            .iter(&barcode("NCN"))
            .unwrap()
            .collect();
        assert_eq!(&all[..5], &["ACA", "ACC", "ACG", "ACT", "CCA"]);
        assert_eq!(all.last().map(String::as_str), Some("TCT"));
    }

    #[test]
    fn test_exact_size_hint() {
        let b = barcode("NN");
        let mut iter = AmbiguityExpander::default().iter(&b).unwrap();
        assert_eq!(iter.len(), 16);
        iter.next();
        assert_eq!(iter.len(), 15);
    }

    #[test]
    fn test_empty_barcode_expands_to_empty_string() {
        let all: Vec<String> = AmbiguityExpander::default()
            .iter(&BarcodeSequence::new(Vec::new()))
            .unwrap()
            .collect();
        assert_eq!(all, vec![String::new()]);
    }

    #[test]
    fn test_limit_exceeded() {
        let expander = AmbiguityExpander::new(2);
        assert!(expander.expand(&barcode("ANN")).is_ok());

        let err = expander.expand(&barcode("NNN")).unwrap_err();
        assert_eq!(
            err,
            ProfileError::ExpansionLimitExceeded {
                ambiguous: 3,
                limit: 2
            }
        );
    }

    #[test]
    fn test_default_cap_refuses_all_n_panel() {
        let b = barcode(&"N".repeat(24));
        assert!(AmbiguityExpander::default().iter(&b).is_err());
        assert_eq!(expansion_size(&b), Some(4usize.pow(24)));
    }
}
