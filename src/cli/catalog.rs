use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::HaplotypeCatalog;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all haplotypes in the catalogue
    List {
        /// Path to catalogue file (CSV, TSV, or JSON)
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Only list haplotypes with a positive weight for this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the weights of a specific haplotype
    Show {
        /// Haplotype sequence
        #[arg(required = true)]
        haplotype: String,

        /// Path to catalogue file (CSV, TSV, or JSON)
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Export the catalogue as JSON
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to catalogue file (CSV, TSV, or JSON)
        #[arg(long, required = true)]
        catalog: PathBuf,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded or written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, category } => {
            run_list(&catalog, category.as_deref(), format, verbose)
        }
        CatalogCommands::Show { haplotype, catalog } => run_show(&haplotype, &catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(&output, &catalog),
    }
}

fn run_list(
    catalog_path: &Path,
    category_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = HaplotypeCatalog::load_from_file(catalog_path)?;

    if verbose {
        eprintln!(
            "Loaded catalogue with {} haplotypes over {} categories",
            catalog.len(),
            catalog.categories().len()
        );
    }

    let filtered: Vec<_> = catalog
        .records
        .iter()
        .filter(|r| match category_filter {
            Some(category) => r.weight(category).is_some_and(|w| w > 0.0),
            None => true,
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("Haplotype Catalogue ({} haplotypes)\n", filtered.len());
            for r in &filtered {
                let top = r
                    .positive_weights()
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(category, weight)| format!("{category} ({weight:.3})"))
                    .unwrap_or_else(|| "-".to_string());
                match r.nsamples {
                    Some(n) => println!("{}  {top}  n={n}", r.haplotype),
                    None => println!("{}  {top}", r.haplotype),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            let categories = catalog.categories();
            println!("haplotype\t{}\tnsamples", categories.join("\t"));
            for r in &filtered {
                let weights: Vec<String> = categories
                    .iter()
                    .map(|c| r.weight(c).map(|w| w.to_string()).unwrap_or_default())
                    .collect();
                println!(
                    "{}\t{}\t{}",
                    r.haplotype,
                    weights.join("\t"),
                    r.nsamples.map(|n| n.to_string()).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn run_show(haplotype: &str, catalog_path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = HaplotypeCatalog::load_from_file(catalog_path)?;

    let records = catalog.get(&haplotype.to_uppercase());
    if records.is_empty() {
        anyhow::bail!("Haplotype '{haplotype}' not found");
    }

    match format {
        OutputFormat::Text => {
            for record in &records {
                println!("Haplotype: {}", record.haplotype);
                if let Some(n) = record.nsamples {
                    println!("Samples:   {n}");
                }
                println!("\n{:<25} {:>10}", "Category", "Weight");
                println!("{}", "-".repeat(36));
                for (category, weight) in &record.weights {
                    println!("{category:<25} {weight:>10.4}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Tsv => {
            println!("haplotype\tcategory\tweight");
            for record in &records {
                for (category, weight) in &record.weights {
                    println!("{}\t{category}\t{weight}", record.haplotype);
                }
            }
        }
    }

    Ok(())
}

fn run_export(output: &Path, catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = HaplotypeCatalog::load_from_file(catalog_path)?;

    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} haplotypes to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
