use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use psee_causal::pipeline::{HybridPipeline, PipelineOutcome};
use psee_core::PseeConfig;

use crate::loader::load_dataset;
use crate::render::write_dot;

/// Discover, refine and render one dataset.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of variables in the dataset.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=4))]
    pub nodes: u8,
    /// File name inside the default folder for `--nodes`.
    #[arg(long)]
    pub pair: Option<String>,
    /// Significance level for the independence tests.
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Root of the data folders.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
    /// Where the DOT rendering is written.
    #[arg(long, default_value = "results")]
    pub results: PathBuf,
}

/// Folder and file used when `--pair` is not given.
pub fn default_source(nodes: u8) -> (PathBuf, &'static str) {
    match nodes {
        2 => (PathBuf::from("pairs"), "pair0001.txt"),
        3 => (Path::new("synthetic").join("3-variables"), "collider_data.csv"),
        _ => (Path::new("synthetic").join("4-variables"), "synthetic_4_var.csv"),
    }
}

/// What `run` produced.
#[derive(Debug)]
pub struct RunSummary {
    pub source: PathBuf,
    pub outcome: PipelineOutcome,
    pub rendered: Option<PathBuf>,
}

pub fn execute(args: &RunArgs, config: &PseeConfig) -> anyhow::Result<RunSummary> {
    let mut config = config.clone();
    if let Some(alpha) = args.alpha {
        config.discovery.alpha = alpha;
    }
    config.validate()?;

    let (folder, default_file) = default_source(args.nodes);
    let file = args.pair.as_deref().unwrap_or(default_file);
    let source = args.data_dir.join(folder).join(file);

    println!("\n--- Loading: {file} ---");
    let data = load_dataset(&source).with_context(|| format!("loading {}", source.display()))?;
    if data.n_vars() != usize::from(args.nodes) {
        tracing::warn!(
            expected = args.nodes,
            found = data.n_vars(),
            "column count differs from --nodes"
        );
    }

    println!("Running PC Algorithm on {} variables...", data.n_vars());
    let pipeline = HybridPipeline::from_config(&config);
    let outcome = pipeline.run(&data)?;

    let base = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    let output = args.results.join(format!("{base}.dot"));
    let title = format!("Causal Analysis: {base}");

    match &outcome.graph {
        Some(graph) => println!(
            "\nFinal Graph: {} nodes, {} edges.",
            graph.node_count(),
            graph.edge_count()
        ),
        None => println!("\nNo graph discovered."),
    }
    println!("Adjacency Matrix:\n{}", outcome.matrix);

    let rendered = write_dot(outcome.graph.as_ref(), &title, &output)?.then_some(output);
    if let Some(path) = &rendered {
        println!("Graph successfully saved to: {}", path.display());
    }

    Ok(RunSummary {
        source,
        outcome,
        rendered,
    })
}
