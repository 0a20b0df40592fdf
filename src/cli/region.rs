use std::path::PathBuf;

use clap::Args;

use crate::cli::{ConfigArgs, OutputFormat};
use crate::matching::region::{GeoClassification, RegionClassifier};
use crate::parsing;

#[derive(Args)]
pub struct RegionArgs {
    /// Geographic evidence file (region, marker, support)
    #[arg(required = true)]
    pub geo_evidence: PathBuf,

    /// Region threshold file (region, threshold) or combined barcode BED
    #[arg(long, required = true)]
    pub rules: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute region subcommand
///
/// # Errors
///
/// Returns an error if inputs cannot be read or the classification fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RegionArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.load()?;
    let rules = parsing::rules::parse_rules_file(&args.rules)?;
    let rows = parsing::evidence::parse_geo_evidence_file(&args.geo_evidence)?;

    let classifier = RegionClassifier::new(rules, config.geoclassification_order)?;
    if verbose {
        eprintln!(
            "Loaded {} region rules and {} evidence rows",
            classifier.rules().len(),
            rows.len()
        );
    }

    let result = classifier.classify(&rows)?;

    match format {
        OutputFormat::Text => print_text_classification(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv_classification(&result),
    }

    Ok(())
}

fn print_text_classification(result: &GeoClassification) {
    if result.regions.is_empty() {
        println!("Region: none");
    } else {
        println!("Region: {}", result.regions.join(", "));
    }

    println!("\nRegion support:");
    for s in &result.support {
        println!(
            "  {}\t{}/{}\t{}",
            s.region,
            s.support,
            s.threshold,
            if s.passed { "pass" } else { "fail" }
        );
    }
}

fn print_tsv_classification(result: &GeoClassification) {
    // The final call repeats on every row so that `Unassigned` is always present
    let classification = result.regions.join(",");
    println!("region\tthreshold\tsupport\tpassed\tassigned\tclassification");
    for s in &result.support {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{classification}",
            s.region,
            s.threshold,
            s.support,
            s.passed,
            result.regions.contains(&s.region)
        );
    }
}
