use std::path::PathBuf;

use clap::Args;

use crate::calling::consensus::CallStatus;
use crate::catalog::store::HaplotypeCatalog;
use crate::cli::{ConfigArgs, OutputFormat};
use crate::matching::engine::HaplotypeMatches;
use crate::parsing;
use crate::pipeline::profile::{Profiler, SampleInput, SampleProfile};

#[derive(Args)]
pub struct BarcodeArgs {
    /// Allele count file (chrom, pos, allele, count)
    #[arg(required = true)]
    pub allele_counts: PathBuf,

    /// Barcode position file (BED-like, offset taken from the end column)
    #[arg(long, required = true)]
    pub positions: PathBuf,

    /// Haplotype catalogue (CSV, TSV, or exported JSON)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Sample identifier used in output
    #[arg(long, default_value = "sample")]
    pub sample_id: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute barcode subcommand
///
/// # Errors
///
/// Returns an error if inputs cannot be read or the sample cannot be profiled.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BarcodeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let positions = parsing::positions::parse_positions_file(&args.positions)?;
    let catalog = HaplotypeCatalog::load_from_file(&args.catalog)?;
    let allele_counts = parsing::evidence::parse_allele_counts_file(&args.allele_counts)?;

    if verbose {
        eprintln!(
            "Loaded {} barcode positions and {} catalogue haplotypes",
            positions.len(),
            catalog.len()
        );
    }

    let profiler = Profiler::new(positions, &catalog, &config)?;
    let profile = profiler.profile(&SampleInput::new(args.sample_id.clone(), allele_counts))?;

    match format {
        OutputFormat::Text => print_text_profile(&profile, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
        OutputFormat::Tsv => print_tsv_matches(&profile),
    }

    Ok(())
}

fn print_text_profile(profile: &SampleProfile, verbose: bool) {
    println!("Sample: {}", profile.id);
    println!(
        "Barcode: {} ({} of {} positions ambiguous)",
        profile.barcode,
        profile.ambiguous_positions,
        profile.barcode.len()
    );

    if verbose {
        println!("\nPosition calls:");
        for call in &profile.position_calls {
            let status = match call.status {
                CallStatus::Called => "called",
                CallStatus::LowDepth => "low depth",
                CallStatus::NoMajority => "no majority",
            };
            println!(
                "  {}\t{}\tdepth={}\tfraction={:.3}\t{status}",
                call.position, call.symbol, call.depth, call.fraction
            );
        }
    }

    match &profile.haplotype_matches {
        HaplotypeMatches::NoMatch => println!("\nNo matching haplotypes in catalogue."),
        HaplotypeMatches::Found { haplotypes, rows } => {
            println!("\nMatching haplotypes: {}", haplotypes.len());
            for haplotype in haplotypes {
                println!("  {haplotype}");
                for row in rows.iter().filter(|r| &r.haplotype == haplotype) {
                    println!("    {}: {:.3}", row.category, row.weight);
                }
            }
        }
    }
}

fn print_tsv_matches(profile: &SampleProfile) {
    println!("sample\tbarcode\thaplotype\tcategory\tweight");
    for row in profile.haplotype_matches.rows() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            profile.id, profile.barcode, row.haplotype, row.category, row.weight
        );
    }
}
