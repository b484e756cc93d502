//! Error taxonomy: one enum per subsystem, folded into [`PseeError`].

mod config_error;
mod data_error;
mod discovery_error;
mod graph_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use discovery_error::DiscoveryError;
pub use graph_error::GraphError;

/// Top-level error for every PSee operation.
#[derive(Debug, thiserror::Error)]
pub enum PseeError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the workspace.
pub type PseeResult<T> = Result<T, PseeError>;
