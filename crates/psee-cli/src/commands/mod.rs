//! `psee` subcommands.

pub mod bench;
pub mod generate;
pub mod run;

use std::path::Path;

use anyhow::Context;
use psee_core::PseeConfig;

/// Load the TOML config at `path`, or defaults when none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PseeConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            PseeConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(PseeConfig::default()),
    }
}
