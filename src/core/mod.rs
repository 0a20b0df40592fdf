//! Core data types for barcode calling and geographic classification.
//!
//! - [`Position`]: a barcode coordinate (sequence name, offset)
//! - [`ConsensusSymbol`]: a called base, or `N` when the call is not confident
//! - [`BarcodeSequence`]: the ordered calls across all barcode positions
//! - [`AlleleEvidence`], [`EvidenceTable`]: per-position read support
//! - [`GeoEvidenceRow`]: marker evidence attributed to a region
//! - [`HaplotypeRecord`]: a catalogue haplotype with its region weights
//! - [`ProfilerConfig`]: thresholds and the region priority order
//! - [`ProfileError`]: the per-sample failure taxonomy
//!
//! [`Position`]: types::Position
//! [`ConsensusSymbol`]: types::ConsensusSymbol
//! [`BarcodeSequence`]: barcode::BarcodeSequence
//! [`AlleleEvidence`]: evidence::AlleleEvidence
//! [`EvidenceTable`]: evidence::EvidenceTable
//! [`GeoEvidenceRow`]: evidence::GeoEvidenceRow
//! [`HaplotypeRecord`]: haplotype::HaplotypeRecord
//! [`ProfilerConfig`]: config::ProfilerConfig
//! [`ProfileError`]: error::ProfileError

pub mod barcode;
pub mod config;
pub mod error;
pub mod evidence;
pub mod haplotype;
pub mod types;
