//! Haplotype matching and region classification.
//!
//! - [`AmbiguityExpander`]: enumerates every concrete sequence an ambiguous
//!   barcode may stand for, refusing barcodes with too many `N`s
//! - [`MatchingEngine`]: intersects an expansion with the haplotype catalogue and
//!   reports the positive region weights of every hit
//! - [`RegionClassifier`]: sums marker evidence per region, applies thresholds,
//!   and resolves multiple hits through a priority order
//!
//! ## Example
//!
//! ```rust
//! use geo_profiler::{BarcodeSequence, HaplotypeCatalog, MatchingEngine};
//!
//! let catalog = HaplotypeCatalog::from_delimited_text(
//!     "haplotype,West,East\nAA,1.0,0.0\nAC,0.2,0.8\nGG,0.0,1.0\n",
//!     b',',
//! ).unwrap();
//!
//! let engine = MatchingEngine::new(&catalog);
//! let barcode = BarcodeSequence::parse("AN").unwrap();
//! let matches = engine.match_barcode(&barcode).unwrap();
//!
//! assert_eq!(matches.haplotypes(), &["AA", "AC"]);
//! for row in matches.rows() {
//!     println!("{}\t{}\t{}", row.haplotype, row.category, row.weight);
//! }
//! ```
//!
//! [`AmbiguityExpander`]: expansion::AmbiguityExpander
//! [`MatchingEngine`]: engine::MatchingEngine
//! [`RegionClassifier`]: region::RegionClassifier

pub mod engine;
pub mod expansion;
pub mod region;
