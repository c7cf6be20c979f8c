use aws_sdk_quicksight::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Fehler aus dem Remote Service oder beim Übersetzen in SDK Typen
#[derive(Debug, Error)]
pub enum QuickSightError {
    #[error("{operation} failed ({}): {message}", .code.as_deref().unwrap_or("unknown"))]
    Service {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("invalid request payload: {0}")]
    Build(#[from] BuildError),

    #[error("unsupported {0}")]
    Unsupported(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("response of {operation} is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl QuickSightError {
    /// Konvertiere SdkError mit Service Error Code
    pub fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let code = err.code().map(str::to_string);
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

        QuickSightError::Service {
            operation,
            code,
            message,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            QuickSightError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(RESOURCE_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = QuickSightError::Service {
            operation: "DescribeDashboard",
            code: Some(RESOURCE_NOT_FOUND.to_string()),
            message: "Dashboard version 3 not found".to_string(),
        };

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "DescribeDashboard failed (ResourceNotFoundException): Dashboard version 3 not found"
        );
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        let err = QuickSightError::Unsupported("physical table variant".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.code(), None);
    }
}
