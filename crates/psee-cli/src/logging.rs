//! Tracing initialization.

use std::sync::Once;

use psee_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the PSee tracing/logging system.
///
/// Reads `PSEE_LOG` for per-module levels, e.g.
/// `PSEE_LOG=psee_causal::discovery=debug,psee_causal=info`. Falls back to
/// `psee=<log_level>` from the config when unset or invalid. Output goes to
/// stderr so stdout carries only results.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PSEE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(format!("psee={}", config.log_level)));

        let json_layer = config
            .json
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let text_layer = (!config.json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .init();
    });
}
