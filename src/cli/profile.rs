use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::catalog::store::HaplotypeCatalog;
use crate::cli::{ConfigArgs, OutputFormat};
use crate::parsing;
use crate::pipeline::batch::profile_entries;
use crate::pipeline::profile::{Profiler, SampleOutcome, SampleProfile};

#[derive(Args)]
pub struct ProfileArgs {
    /// Sample sheet (id, allele counts path, optional geographic evidence path)
    #[arg(required = true)]
    pub samples: PathBuf,

    /// Barcode position file (BED-like, offset taken from the end column)
    #[arg(long, required = true)]
    pub positions: PathBuf,

    /// Haplotype catalogue (CSV, TSV, or exported JSON)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Region threshold file; required when any sample lists geographic evidence
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Exit with an error if any sample fails
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute profile subcommand
///
/// # Errors
///
/// Returns an error if shared inputs cannot be loaded, or if `--strict` is set
/// and any sample failed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ProfileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let positions = parsing::positions::parse_positions_file(&args.positions)?;
    let catalog = HaplotypeCatalog::load_from_file(&args.catalog)?;
    let entries = parsing::samples::parse_sample_sheet_file(&args.samples)?;

    let mut profiler = Profiler::new(positions, &catalog, &config)?;
    if let Some(rules_path) = &args.rules {
        profiler = profiler.with_region_rules(parsing::rules::parse_rules_file(rules_path)?)?;
    }

    if verbose {
        eprintln!(
            "Profiling {} samples against {} catalogue haplotypes",
            entries.len(),
            catalog.len()
        );
    }

    let outcomes = profile_entries(&profiler, &entries);

    let mut failed = 0;
    for outcome in &outcomes {
        if let SampleOutcome::Failed { id, reason } = outcome {
            eprintln!("Sample '{id}' failed: {reason}");
            failed += 1;
        }
    }

    match format {
        OutputFormat::Text => print_text_outcomes(&outcomes),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "generated_at": Utc::now().to_rfc3339(),
                "samples": outcomes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv_outcomes(&outcomes),
    }

    if args.strict && failed > 0 {
        anyhow::bail!("{failed} of {} samples failed", outcomes.len());
    }

    Ok(())
}

fn region_summary(profile: &SampleProfile) -> String {
    profile
        .geoclassification
        .as_ref()
        .map(|g| g.regions.join(","))
        .unwrap_or_default()
}

fn print_text_outcomes(outcomes: &[SampleOutcome]) {
    for profile in outcomes.iter().filter_map(SampleOutcome::profile) {
        let haplotypes = profile.haplotype_matches.haplotypes();
        let matches = if haplotypes.is_empty() {
            "no match".to_string()
        } else {
            haplotypes.join(",")
        };
        print!("{}\t{}\t{matches}", profile.id, profile.barcode);
        if profile.geoclassification.is_some() {
            print!("\t{}", region_summary(profile));
        }
        println!();
    }
}

fn print_tsv_outcomes(outcomes: &[SampleOutcome]) {
    println!("sample\tbarcode\tambiguous_positions\thaplotypes\tgeoclassification");
    for profile in outcomes.iter().filter_map(SampleOutcome::profile) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            profile.id,
            profile.barcode,
            profile.ambiguous_positions,
            profile.haplotype_matches.haplotypes().join(","),
            region_summary(profile)
        );
    }
}
