//! Form State — the two user-editable fields and the derived submit-eligibility.

use std::path::Path;

use bytes::Bytes;

use crate::errors::ClientError;

/// MIME type of every attachable document.
pub const CV_MIME_TYPE: &str = "application/pdf";

/// A CV selected by the user: original filename plus raw content.
#[derive(Debug, Clone, PartialEq)]
pub struct CvDocument {
    pub name: String,
    pub content: Bytes,
}

impl CvDocument {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a document from disk. Only `.pdf` files are selectable; content is
    /// not inspected.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_pdf_name(&name) {
            return Err(ClientError::UnsupportedDocument(name));
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Document {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(name, content))
    }
}

fn is_pdf_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub job_description: String,
    pub cv_document: Option<CvDocument>,
}

impl ApplicationForm {
    /// True when the job description has any non-whitespace content.
    /// The attached document plays no part.
    pub fn can_submit(&self) -> bool {
        !self.job_description.trim().is_empty()
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Replaces the attached document wholesale; `None` clears it.
    pub fn select_document(&mut self, document: Option<CvDocument>) {
        self.cv_document = document;
    }

    pub fn document_name(&self) -> Option<&str> {
        self.cv_document.as_ref().map(|d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn form_with(text: &str) -> ApplicationForm {
        ApplicationForm {
            job_description: text.to_string(),
            cv_document: None,
        }
    }

    #[test]
    fn test_can_submit_tracks_trimmed_text() {
        let cases = [
            ("", false),
            ("   ", false),
            ("\n\t \r\n", false),
            ("Rust engineer", true),
            ("  x  ", true),
        ];
        for (text, expected) in cases {
            assert_eq!(form_with(text).can_submit(), expected, "text: {text:?}");
        }
    }

    #[test]
    fn test_can_submit_ignores_document() {
        let mut form = form_with("  ");
        form.select_document(Some(CvDocument::new("cv.pdf", b"%PDF-1.7".to_vec())));
        assert!(!form.can_submit());

        form.set_job_description("Backend engineer");
        form.select_document(None);
        assert!(form.can_submit());
    }

    #[test]
    fn test_can_submit_never_stale_after_edit() {
        let mut form = form_with("Platform engineer");
        assert!(form.can_submit());
        form.set_job_description("");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_select_document_replaces_wholesale() {
        let mut form = ApplicationForm::default();
        form.select_document(Some(CvDocument::new("first.pdf", b"one".to_vec())));
        form.select_document(Some(CvDocument::new("second.pdf", b"two".to_vec())));

        let doc = form.cv_document.as_ref().unwrap();
        assert_eq!(doc.name, "second.pdf");
        assert_eq!(doc.content, Bytes::from_static(b"two"));
        assert_eq!(form.document_name(), Some("second.pdf"));
    }

    #[test]
    fn test_pdf_name_check_is_case_insensitive() {
        assert!(is_pdf_name("cv.pdf"));
        assert!(is_pdf_name("CV.PDF"));
        assert!(!is_pdf_name("cv.docx"));
        assert!(!is_pdf_name("pdf"));
        assert!(!is_pdf_name(""));
    }

    #[tokio::test]
    async fn test_from_path_reads_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane_Doe.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4 fake").unwrap();

        let doc = CvDocument::from_path(&path).await.unwrap();
        assert_eq!(doc.name, "Jane_Doe.pdf");
        assert_eq!(doc.content, Bytes::from_static(b"%PDF-1.4 fake"));
    }

    #[tokio::test]
    async fn test_from_path_rejects_non_pdf_before_reading() {
        let err = CvDocument::from_path(Path::new("/nonexistent/cv.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedDocument(name) if name == "cv.txt"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CvDocument::from_path(&dir.path().join("gone.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Document { .. }));
    }
}
