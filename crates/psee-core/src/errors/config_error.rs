/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {message}")]
    ParseError { message: String },

    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
