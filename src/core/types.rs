use serde::{Deserialize, Serialize};

/// A genomic coordinate on a named sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Sequence (chromosome) name
    pub chrom: String,

    /// Offset on the sequence
    pub pos: u64,
}

impl Position {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// One called symbol of a barcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConsensusSymbol {
    A,
    C,
    G,
    T,
    /// Not confidently callable
    N,
}

impl ConsensusSymbol {
    /// The four concrete nucleotides, in expansion order
    pub const NUCLEOTIDES: [ConsensusSymbol; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// Parse a single-base allele symbol (case-insensitive).
    ///
    /// Returns `None` for anything that is not exactly one of A/C/G/T/N, which
    /// covers indel alleles, spanning deletions (`*`) and multi-base alleles.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'C' => Some(Self::C),
            'G' => Some(Self::G),
            'T' => Some(Self::T),
            'N' => Some(Self::N),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
            Self::N => 'N',
        }
    }

    /// Whether this symbol is a concrete nucleotide (not `N`)
    pub fn is_nucleotide(self) -> bool {
        !matches!(self, Self::N)
    }

    /// Concrete nucleotides this symbol may stand for
    pub fn alternatives(self) -> &'static [ConsensusSymbol] {
        match self {
            Self::A => &Self::NUCLEOTIDES[0..1],
            Self::C => &Self::NUCLEOTIDES[1..2],
            Self::G => &Self::NUCLEOTIDES[2..3],
            Self::T => &Self::NUCLEOTIDES[3..4],
            Self::N => &Self::NUCLEOTIDES,
        }
    }
}

impl std::fmt::Display for ConsensusSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Aggregated evidence a region needs before it counts as hit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionRule {
    pub region: String,
    pub threshold: u64,
}

impl RegionRule {
    pub fn new(region: impl Into<String>, threshold: u64) -> Self {
        Self {
            region: region.into(),
            threshold,
        }
    }
}

/// Literal classification emitted when a priority order is configured but no region passes
pub const UNASSIGNED: &str = "Unassigned";
