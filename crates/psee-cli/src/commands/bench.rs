use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use psee_causal::benchmark::{score, BenchmarkSummary, GroundTruth, Verdict};
use psee_causal::pipeline::{BatchStatus, HybridPipeline};
use psee_core::{Dataset, ExpectedDirection, PseeConfig};
use serde::Serialize;
use tracing::warn;

use crate::loader::load_dataset;

/// Score two-variable pairs against a ground-truth table.
#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Folder holding the pair files.
    #[arg(long)]
    pub dir: PathBuf,
    /// TOML file with a `[pairs]` table of id → "A --> B" | "B --> A" |
    /// "Ind/Confounder" | "Unknown".
    #[arg(long)]
    pub truth: PathBuf,
    /// Significance level for the independence tests.
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Print one JSON object per dataset instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One scored dataset.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub id: String,
    pub expected: ExpectedDirection,
    pub status: BatchStatus,
    pub verdict: Verdict,
}

pub fn execute(args: &BenchArgs, config: &PseeConfig) -> anyhow::Result<(Vec<BenchRow>, BenchmarkSummary)> {
    let mut config = config.clone();
    if let Some(alpha) = args.alpha {
        config.discovery.alpha = alpha;
    }
    config.validate()?;

    let text = fs::read_to_string(&args.truth)
        .with_context(|| format!("reading {}", args.truth.display()))?;
    let truth = GroundTruth::from_toml(&text)?;

    let mut files: Vec<PathBuf> = fs::read_dir(&args.dir)
        .with_context(|| format!("listing {}", args.dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("txt" | "csv")
            )
        })
        .collect();
    files.sort();

    let mut loaded: Vec<(String, Dataset)> = Vec::new();
    let mut rows = Vec::new();
    for path in files {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load_dataset(&path) {
            Ok(data) if data.n_vars() == 2 => loaded.push((id, data)),
            Ok(data) => warn!(dataset = %id, variables = data.n_vars(), "not a pair, skipped"),
            Err(e) => {
                warn!(dataset = %id, error = %e, "unreadable dataset");
                rows.push(BenchRow {
                    expected: truth.expected(&id),
                    id,
                    status: BatchStatus::StructuralError(e.to_string()),
                    verdict: Verdict::NotScored,
                });
            }
        }
    }

    let pipeline = HybridPipeline::from_config(&config);
    let entries = pipeline.run_batch(loaded.iter().map(|(id, data)| (id.as_str(), data)));
    for entry in entries {
        let expected = truth.expected(&entry.id);
        let verdict = match &entry.outcome {
            Some(outcome) => score(&outcome.matrix, expected),
            None => Verdict::NotScored,
        };
        rows.push(BenchRow {
            id: entry.id,
            expected,
            status: entry.status,
            verdict,
        });
    }
    rows.sort_by(|a, b| a.id.cmp(&b.id));

    let mut summary = BenchmarkSummary::default();
    for row in &rows {
        summary.record(row.verdict);
        if args.json {
            println!("{}", serde_json::to_string(row)?);
        } else {
            println!("{:<16} {:<16} {:?}", row.id, row.expected.as_str(), row.verdict);
        }
    }
    match summary.accuracy() {
        Some(acc) => println!(
            "Accuracy: {:.1}% ({}/{} scored, {} not scored)",
            acc * 100.0,
            summary.correct,
            summary.scored(),
            summary.not_scored
        ),
        None => println!("Nothing scored ({} datasets)", summary.not_scored),
    }

    Ok((rows, summary))
}
