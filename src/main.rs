use clap::Parser;
use tracing_subscriber::EnvFilter;

mod calling;
mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod pipeline;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("geo_profiler=debug,info")
    } else {
        EnvFilter::new("geo_profiler=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Barcode(args) => {
            cli::barcode::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Region(args) => {
            cli::region::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Profile(args) => {
            cli::profile::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
