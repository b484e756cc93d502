//! Layered configuration: every section falls back to [`defaults`].

mod anm_config;
pub mod defaults;
mod discovery_config;
mod observability_config;

pub use anm_config::AnmConfig;
pub use discovery_config::DiscoveryConfig;
pub use observability_config::ObservabilityConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, PseeResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PseeConfig {
    pub discovery: DiscoveryConfig,
    pub anm: AnmConfig,
    pub observability: ObservabilityConfig,
}

impl PseeConfig {
    /// Parse from a TOML string; missing sections and fields take defaults.
    pub fn from_toml(source: &str) -> PseeResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> PseeResult<String> {
        toml::to_string(self).map_err(|e| {
            ConfigError::ParseError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> PseeResult<()> {
        check_alpha("discovery.alpha", self.discovery.alpha)?;
        check_alpha("anm.alpha", self.anm.alpha)?;

        if self.discovery.chi_square_bins < 2 {
            return Err(invalid("discovery.chi_square_bins", "must be at least 2"));
        }
        if self.anm.max_samples < 10 {
            return Err(invalid("anm.max_samples", "must be at least 10"));
        }
        if self.anm.length_scales.is_empty()
            || self.anm.length_scales.iter().any(|l| !is_positive(*l))
        {
            return Err(invalid(
                "anm.length_scales",
                "must be a non-empty list of positive values",
            ));
        }
        if self.anm.noise_levels.is_empty() || self.anm.noise_levels.iter().any(|n| !is_positive(*n))
        {
            return Err(invalid(
                "anm.noise_levels",
                "must be a non-empty list of positive values",
            ));
        }
        Ok(())
    }
}

fn check_alpha(field: &str, alpha: f64) -> PseeResult<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(invalid(field, &format!("{alpha} is outside [0, 1]")))
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(field: &str, message: &str) -> crate::errors::PseeError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
