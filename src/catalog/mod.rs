//! Haplotype catalogue storage and indexing.
//!
//! The catalogue maps concrete barcode sequences (haplotypes) to per-region
//! weights. It is loaded once, from a delimited table or an exported JSON file,
//! and is read-only afterwards.
//!
//! ## Table Format
//!
//! ```text
//! haplotype,Africa,Asia,Oceania,nsamples
//! ACGTTAG,0.9,0.1,0.0,12
//! ACGTTAC,0.0,0.5,0.5,4
//! ```
//!
//! Every column other than `haplotype` and the sample-count column is a region
//! weight.
//!
//! ## Example
//!
//! ```rust
//! use geo_profiler::HaplotypeCatalog;
//!
//! let catalog = HaplotypeCatalog::from_delimited_text(
//!     "haplotype,Africa,Asia,nsamples\nACGT,0.9,0.1,12\n",
//!     b',',
//! ).unwrap();
//!
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.get("ACGT")[0].weight("Africa"), Some(0.9));
//! ```

pub mod index;
pub mod store;
