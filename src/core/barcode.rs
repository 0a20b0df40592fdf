use serde::{Serialize, Serializer};

use crate::core::types::ConsensusSymbol;

/// Ordered consensus symbols, one per configured barcode position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BarcodeSequence {
    symbols: Vec<ConsensusSymbol>,
}

impl BarcodeSequence {
    #[must_use]
    pub fn new(symbols: Vec<ConsensusSymbol>) -> Self {
        Self { symbols }
    }

    /// Parse a barcode string such as `"ACNNT"`. Returns `None` on any other character.
    pub fn parse(s: &str) -> Option<Self> {
        s.chars()
            .map(ConsensusSymbol::from_char)
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    pub fn symbols(&self) -> &[ConsensusSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of `N` symbols
    pub fn ambiguous_count(&self) -> usize {
        self.symbols.iter().filter(|s| !s.is_nucleotide()).count()
    }

    /// Whether a concrete sequence is one of this barcode's expansions
    pub fn is_consistent_with(&self, concrete: &str) -> bool {
        concrete.len() == self.symbols.len()
            && self.symbols.iter().zip(concrete.chars()).all(|(s, c)| {
                match ConsensusSymbol::from_char(c) {
                    Some(other) if other.is_nucleotide() => {
                        !s.is_nucleotide() || *s == other
                    }
                    _ => false,
                }
            })
    }
}

impl std::fmt::Display for BarcodeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl Serialize for BarcodeSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let barcode = BarcodeSequence::parse("acgNt").unwrap();
        assert_eq!(barcode.to_string(), "ACGNT");
        assert_eq!(barcode.len(), 5);
        assert_eq!(barcode.ambiguous_count(), 1);
        assert!(BarcodeSequence::parse("ACX").is_none());
    }

    #[test]
    fn test_is_consistent_with() {
        let barcode = BarcodeSequence::parse("AN").unwrap();
        assert!(barcode.is_consistent_with("AA"));
        assert!(barcode.is_consistent_with("AT"));
        assert!(!barcode.is_consistent_with("CT"));
        assert!(!barcode.is_consistent_with("A"));
        assert!(!barcode.is_consistent_with("AN"));
    }

    #[test]
    fn test_serializes_as_string() {
        let barcode = BarcodeSequence::parse("GATN").unwrap();
        assert_eq!(serde_json::to_string(&barcode).unwrap(), "\"GATN\"");
    }
}
