//! Command-line interface for geo-profiler.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **barcode**: Call a sample's barcode and match it against the haplotype catalogue
//! - **region**: Classify a sample's region from marker evidence and thresholds
//! - **profile**: Run both stages over every sample of a sample sheet
//! - **catalog**: List, show, or export the haplotype catalogue
//!
//! ## Usage
//!
//! ```text
//! # Barcode and haplotype matches for one sample
//! geo-profiler barcode --positions barcode.bed --catalog haplotypes.csv sample.counts.tsv
//!
//! # Region call with a priority order
//! geo-profiler region --rules barcode.bed --priority Africa,Asia sample.geo.tsv
//!
//! # Batch profile, one TSV row per sample
//! geo-profiler profile --positions barcode.bed --catalog haplotypes.csv \
//!     --rules barcode.bed samples.tsv --format tsv
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::ProfilerConfig;
use crate::utils::validation::split_list;

pub mod barcode;
pub mod catalog;
pub mod profile;
pub mod region;

#[derive(Parser)]
#[command(name = "geo-profiler")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Call geographic barcodes and classify samples against a haplotype catalogue")]
#[command(
    long_about = "geo-profiler reduces per-position allele counts at a fixed barcode panel to a consensus barcode.\n\nIt then:\n- Expands ambiguous (N) positions and matches the barcode against a haplotype catalogue\n- Reports the region weights of every matching haplotype\n- Assigns a region from marker evidence and per-region thresholds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call a barcode and match it against the haplotype catalogue
    Barcode(barcode::BarcodeArgs),

    /// Classify a region from marker evidence
    Region(region::RegionArgs),

    /// Profile every sample in a sample sheet
    Profile(profile::ProfileArgs),

    /// Inspect the haplotype catalogue
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by commands that load a profiler config
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON config file (thresholds and geoclassification_order)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum read depth to call a position [default: 10]
    #[arg(long)]
    pub min_depth: Option<u64>,

    /// Fraction of depth the majority allele must exceed [default: 0.8]
    #[arg(long)]
    pub min_fraction: Option<f64>,

    /// Maximum number of N positions to expand [default: 10]
    #[arg(long)]
    pub max_ambiguous: Option<usize>,

    /// Comma-separated region priority order, overriding the config file
    #[arg(long)]
    pub priority: Option<String>,
}

impl ConfigArgs {
    /// Load the config file, if any, and apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the result is invalid.
    pub fn load(&self) -> anyhow::Result<ProfilerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ProfilerConfig::default(),
        };

        if let Some(min_depth) = self.min_depth {
            config.calling.min_depth = min_depth;
        }
        if let Some(min_fraction) = self.min_fraction {
            config.calling.min_fraction = min_fraction;
        }
        if let Some(max_ambiguous) = self.max_ambiguous {
            config.max_ambiguous_positions = max_ambiguous;
        }
        if let Some(priority) = &self.priority {
            config.geoclassification_order = Some(split_list(priority));
        }

        config.validate()?;
        Ok(config)
    }
}

fn load_config_file(path: &Path) -> anyhow::Result<ProfilerConfig> {
    ProfilerConfig::load_from_file(path)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_overrides() {
        let args = ConfigArgs {
            min_depth: Some(5),
            priority: Some("East,West".to_string()),
            ..ConfigArgs::default()
        };
        let config = args.load().unwrap();
        assert_eq!(config.calling.min_depth, 5);
        assert_eq!(
            config.geoclassification_order,
            Some(vec!["East".to_string(), "West".to_string()])
        );
    }

    #[test]
    fn test_config_override_validated() {
        let args = ConfigArgs {
            min_fraction: Some(2.0),
            ..ConfigArgs::default()
        };
        assert!(args.load().is_err());
    }
}
