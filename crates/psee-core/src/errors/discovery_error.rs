/// Structure-discovery errors. The engine converts these into the absent-graph
/// sentinel at its boundary; they only surface when calling the fallible entry
/// points directly.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("significance level {alpha} outside [0, 1]")]
    InvalidAlpha { alpha: f64 },

    #[error("unknown independence test: {name}")]
    UnknownTest { name: String },

    #[error("orientation failed: {reason}")]
    OrientationFailed { reason: String },
}
