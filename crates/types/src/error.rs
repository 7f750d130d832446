use thiserror::Error;

/// Errors raised while loading or validating the pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid("feature_window must be at least 2".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: feature_window must be at least 2"
        );
    }
}
