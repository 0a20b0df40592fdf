//! Parsers for the tab-separated inputs of the profiler.
//!
//! - **Barcode positions**: BED-like rows whose `end` column is the barcode offset
//! - **Region rules**: `region threshold` rows, or the combined barcode BED
//! - **Allele counts**: per-position read support, `chrom pos allele count`
//! - **Geographic evidence**: `region marker support` rows
//! - **Sample sheets**: batch inputs, `id allele_counts [geo_evidence]`
//!
//! All readers skip blank lines and `#` comments, detect an optional header
//! line, and transparently decompress `.gz` files.
//!
//! ## Example
//!
//! ```rust
//! use geo_profiler::parsing::positions::parse_positions_text;
//!
//! let positions = parse_positions_text("chr1\t99\t100\nchr1\t199\t200\n").unwrap();
//! assert_eq!(positions.len(), 2);
//! assert_eq!(positions[0].pos, 100);
//! ```

pub mod evidence;
pub mod positions;
pub mod rules;
pub mod samples;
pub mod table;

pub use table::ParseError;
