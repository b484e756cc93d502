//! End-to-end tests for the `psee` subcommands.

use std::fs;
use std::path::Path;

use psee_causal::benchmark::Verdict;
use psee_causal::synthetic::{CausalModel, Structure};
use psee_cli::commands::bench::{self, BenchArgs};
use psee_cli::commands::generate::{self, write_csv, GenerateArgs};
use psee_cli::commands::run::{self, RunArgs};
use psee_cli::commands::load_config;
use psee_cli::loader::load_dataset;
use psee_core::PseeConfig;

fn fast_config() -> PseeConfig {
    let mut config = PseeConfig::default();
    config.anm.max_samples = 100;
    config
}

#[test]
fn generated_csv_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let summary = generate::execute(
        &GenerateArgs {
            structure: Structure::Chain,
            nodes: 4,
            samples: 50,
            seed: 3,
            data_dir: dir.path().to_path_buf(),
            output: None,
            evaluate: false,
        },
        &fast_config(),
    )
    .unwrap();

    assert!(summary.score.is_none());
    let path = summary.path;
    assert_eq!(
        path,
        dir.path().join("synthetic").join("4-variables").join("chain_data.csv")
    );
    let data = load_dataset(&path).unwrap();
    assert_eq!(data.n_vars(), 4);
    assert_eq!(data.n_rows(), 50);
}

#[test]
fn evaluate_scores_every_true_edge() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fast_config();
    config.discovery.alpha = 0.01;
    let summary = generate::execute(
        &GenerateArgs {
            structure: Structure::Collider,
            nodes: 3,
            samples: 400,
            seed: 11,
            data_dir: dir.path().to_path_buf(),
            output: Some(dir.path().join("collider.csv")),
            evaluate: true,
        },
        &config,
    )
    .unwrap();

    let score = summary.score.unwrap();
    assert_eq!(score.missing, 0, "{score:?}");
    assert_eq!(score.correct + score.reversed, 2, "{score:?}");
}

#[test]
fn run_uses_smart_default_and_writes_dot() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let results = dir.path().join("results");
    let data = CausalModel::new(150, 5)
        .generate(Structure::Collider, 3)
        .unwrap();
    write_csv(
        &data,
        &data_dir
            .join("synthetic")
            .join("3-variables")
            .join("collider_data.csv"),
    )
    .unwrap();

    let summary = run::execute(
        &RunArgs {
            nodes: 3,
            pair: None,
            alpha: Some(0.01),
            data_dir,
            results: results.clone(),
        },
        &fast_config(),
    )
    .unwrap();

    assert_eq!(summary.outcome.matrix.shape(), (3, 3));
    let rendered = summary.rendered.unwrap();
    assert_eq!(rendered, results.join("collider_data.dot"));
    let dot = fs::read_to_string(rendered).unwrap();
    assert!(dot.starts_with("// Causal Analysis: collider_data"));
}

#[test]
fn run_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = run::execute(
        &RunArgs {
            nodes: 2,
            pair: Some("nope.txt".into()),
            alpha: None,
            data_dir: dir.path().to_path_buf(),
            results: dir.path().join("results"),
        },
        &fast_config(),
    );
    assert!(result.is_err());
}

#[test]
fn run_rejects_alpha_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let result = run::execute(
        &RunArgs {
            nodes: 2,
            pair: None,
            alpha: Some(2.0),
            data_dir: dir.path().to_path_buf(),
            results: dir.path().join("results"),
        },
        &fast_config(),
    );
    assert!(result.is_err());
}

fn write_pair(dir: &Path, name: &str, seed: u64) {
    let data = CausalModel::new(120, seed).anm_pair().unwrap();
    let text: String = data
        .column_at(0)
        .iter()
        .zip(data.column_at(1))
        .map(|(a, b)| format!("{a} {b}\n"))
        .collect();
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn bench_scores_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = dir.path().join("pairs");
    fs::create_dir_all(&pairs).unwrap();
    write_pair(&pairs, "pair0001.txt", 1);
    write_pair(&pairs, "pair0002.txt", 2);
    fs::write(pairs.join("pair0003.txt"), "not numbers\n").unwrap();
    fs::write(pairs.join("README.md"), "ignored").unwrap();

    let truth = dir.path().join("truth.toml");
    fs::write(
        &truth,
        "[pairs]\npair0001 = \"A --> B\"\npair0002 = \"Unknown\"\n",
    )
    .unwrap();

    let (rows, summary) = bench::execute(
        &BenchArgs {
            dir: pairs,
            truth,
            alpha: None,
            json: false,
        },
        &fast_config(),
    )
    .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].verdict, Verdict::NotScored);
    assert_eq!(rows[2].verdict, Verdict::NotScored);
    assert_eq!(summary.scored() + summary.not_scored, 3);
}

#[test]
fn config_file_is_optional() {
    assert!(load_config(None).is_ok());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("psee.toml");
    fs::write(&path, "[discovery]\nalpha = 0.01\nci_test = \"fisher-z\"\n").unwrap();
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.discovery.alpha, 0.01);
    fs::write(&path, "[anm]\nmax_samples = 0\n").unwrap();
    assert!(load_config(Some(&path)).is_err());
}
