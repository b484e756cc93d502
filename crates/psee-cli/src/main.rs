//! `psee`: hybrid causal discovery from the command line.
//!
//! - `run`: PC search + ANM refinement on one dataset, DOT output
//! - `generate`: seeded fork/collider/chain datasets
//! - `bench`: score two-variable pairs against ground truth

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use psee_cli::commands::{self, bench::BenchArgs, generate::GenerateArgs, run::RunArgs};
use psee_cli::logging::init_tracing;

#[derive(Parser)]
#[command(name = "psee")]
#[command(version, about = "PSee: Hybrid Causal Discovery Pipeline")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and refine the causal graph of one dataset.
    Run(RunArgs),
    /// Write a synthetic benchmark dataset.
    Generate(GenerateArgs),
    /// Score a folder of pairs against ground truth.
    Bench(BenchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    init_tracing(&config.observability);

    match cli.command {
        Commands::Run(args) => {
            commands::run::execute(&args, &config)?;
        }
        Commands::Generate(args) => {
            commands::generate::execute(&args, &config)?;
        }
        Commands::Bench(args) => {
            commands::bench::execute(&args, &config)?;
        }
    }
    Ok(())
}
