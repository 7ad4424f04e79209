use std::path::PathBuf;

use thiserror::Error;

/// Client-level error type.
/// Covers everything that can go wrong outside a submission attempt: startup,
/// configuration and document selection. Submission failures never surface as
/// `ClientError`; they become `SubmissionStatus::Failed` with a message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported document '{0}': only PDF files can be attached")]
    UnsupportedDocument(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_document_message_names_file() {
        let err = ClientError::UnsupportedDocument("cv.docx".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported document 'cv.docx': only PDF files can be attached"
        );
    }

    #[test]
    fn test_document_error_includes_path_and_cause() {
        let err = ClientError::Document {
            path: PathBuf::from("/tmp/missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/missing.pdf"));
        assert!(message.contains("no such file"));
    }
}
