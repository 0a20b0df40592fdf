//! # geo-profiler
//!
//! A library for calling geographic barcodes from sequencing evidence and
//! assigning samples to regions.
//!
//! A barcode is a fixed panel of genomic positions whose alleles differ between
//! populations. Given per-position allele counts for a sample, `geo-profiler`
//! reduces the panel to a consensus barcode, matches it against a catalogue of
//! known haplotypes, and, separately, assigns a region from marker evidence and
//! per-region thresholds.
//!
//! ## Features
//!
//! - **Consensus calling**: Depth and majority-fraction thresholds per position,
//!   with `N` for positions that cannot be called
//! - **Ambiguity expansion**: Every `N` stands for any nucleotide, bounded by a
//!   configurable cap on ambiguous positions
//! - **Haplotype matching**: Exact lookup of every expansion in the catalogue,
//!   reporting each matched haplotype's positive category weights
//! - **Region classification**: Inclusive per-region thresholds, resolved by a
//!   priority order when several regions pass
//! - **Batch profiling**: Samples run in parallel; one bad sample never stops
//!   the rest
//!
//! ## Example
//!
//! ```rust
//! use geo_profiler::{HaplotypeCatalog, Position, Profiler, ProfilerConfig, SampleInput};
//! use geo_profiler::core::evidence::EvidenceTable;
//!
//! let catalog = HaplotypeCatalog::from_delimited_text(
//!     "haplotype,West,East\nAA,0.9,0.1\nAC,0.0,1.0\n",
//!     b',',
//! )
//! .unwrap();
//!
//! let positions = vec![Position::new("chr1", 100), Position::new("chr1", 200)];
//! let profiler = Profiler::new(positions, &catalog, &ProfilerConfig::default()).unwrap();
//!
//! let mut counts = EvidenceTable::new();
//! counts.add(Position::new("chr1", 100), "A", 15);
//! counts.add(Position::new("chr1", 100), "G", 2);
//! counts.add(Position::new("chr1", 200), "A", 3);
//! counts.add(Position::new("chr1", 200), "C", 3);
//!
//! let profile = profiler.profile(&SampleInput::new("S1", counts)).unwrap();
//! assert_eq!(profile.barcode.to_string(), "AN");
//! assert_eq!(profile.haplotype_matches.haplotypes(), &["AA", "AC"]);
//! ```
//!
//! ## Modules
//!
//! - [`calling`]: Per-position consensus calling
//! - [`catalog`]: Haplotype catalogue storage and lookup
//! - [`core`]: Core data types, configuration, and errors
//! - [`matching`]: Ambiguity expansion, haplotype matching, region classification
//! - [`parsing`]: Parsers for position, rule, evidence, and sample sheet files
//! - [`pipeline`]: Per-sample and batch profiling
//! - [`cli`]: Command-line interface implementation

pub mod calling;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::HaplotypeCatalog;
pub use core::barcode::BarcodeSequence;
pub use core::config::ProfilerConfig;
pub use core::error::ProfileError;
pub use core::types::*;
pub use matching::engine::{HaplotypeMatches, MatchingEngine};
pub use matching::region::{GeoClassification, RegionClassifier};
pub use pipeline::profile::{Profiler, SampleInput, SampleOutcome, SampleProfile};
