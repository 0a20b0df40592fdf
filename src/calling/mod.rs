//! Consensus calling of barcode positions.
//!
//! Each configured position is reduced to a single [`ConsensusSymbol`] from its
//! allele read counts:
//!
//! 1. Total depth below `min_depth` (default 10) gives `N`
//! 2. Otherwise the best-supported nucleotide is called if its fraction of the
//!    depth is strictly above `min_fraction` (default 0.8)
//! 3. Anything else gives `N`
//!
//! Indel and other non-nucleotide alleles count toward depth but are never called.
//!
//! [`ConsensusSymbol`]: crate::core::types::ConsensusSymbol

pub mod consensus;
