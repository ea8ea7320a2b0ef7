use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the analysis engines and the readers feeding them.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Malformed input ({context}): {message}")]
    MalformedInput { context: String, message: String },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Cannot sample {requested} items from a population of {available}")]
    Sampling { requested: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalysisError {
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyInput(what.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::MissingInput {
            path: PathBuf::from("reads/a.fastq"),
        };
        assert_eq!(err.to_string(), "Input not found: reads/a.fastq");

        let err = AnalysisError::Sampling {
            requested: 12,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "Cannot sample 12 items from a population of 10"
        );

        let err = AnalysisError::malformed("counts.csv line 4", "expected 7 columns, found 3");
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AnalysisError = io_err.into();
        assert!(matches!(err, AnalysisError::Io(_)));
    }
}
