use thiserror::Error;

/// Failures of the external text-transform collaborator.
///
/// Both kinds leave the displayed text untouched and can be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// No collaborator is configured (missing command or credential).
    #[error("text transform unavailable: {0}")]
    Unavailable(String),

    /// The collaborator was reached but the call failed or was rejected.
    #[error("text transform failed: {0}")]
    Failed(String),
}

impl TransformError {
    /// Short message for the status line.
    pub fn user_message(&self) -> String {
        match self {
            TransformError::Unavailable(_) => format!(
                "{} (set SPEEDREAD_TRANSFORM_CMD, then retry)",
                self
            ),
            TransformError::Failed(_) => format!("{} (press the key again to retry)", self),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_error_display() {
        let err = TransformError::Unavailable("no command configured".to_string());
        assert_eq!(
            err.to_string(),
            "text transform unavailable: no command configured"
        );

        let err = TransformError::Failed("exit status 2".to_string());
        assert_eq!(err.to_string(), "text transform failed: exit status 2");
    }

    #[test]
    fn test_user_message_mentions_retry() {
        let unavailable = TransformError::Unavailable("x".to_string());
        assert!(unavailable.user_message().contains("SPEEDREAD_TRANSFORM_CMD"));
        assert!(unavailable.user_message().contains("retry"));

        let failed = TransformError::Failed("x".to_string());
        assert!(failed.user_message().contains("retry"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "SPEEDREAD_WPM",
            value: "fast".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for SPEEDREAD_WPM: \"fast\"");
    }
}
