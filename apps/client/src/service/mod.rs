/// Generation service client — the single point of contact with the remote
/// upload endpoint.
///
/// No other module issues HTTP requests. The controller talks to the service
/// only through the `GenerationService` trait so tests can script replies.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::errors::ClientError;
use crate::form::{ApplicationForm, CvDocument, CV_MIME_TYPE};

pub mod resolution;

/// Multipart field carrying the job description.
pub const JD_FIELD: &str = "jd";
/// Multipart field carrying the CV document.
pub const FILE_FIELD: &str = "file";

/// A failure to obtain (or read) any response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    // Raised by non-HTTP transports and test doubles.
    #[allow(dead_code)]
    #[error("{0}")]
    Described(String),

    #[allow(dead_code)]
    #[error("transport failure")]
    Opaque,
}

impl TransportError {
    /// The human-readable cause, if the failure carries one.
    pub fn description(&self) -> Option<String> {
        match self {
            TransportError::Http(e) => Some(e.to_string()),
            TransportError::Described(msg) if !msg.trim().is_empty() => Some(msg.clone()),
            TransportError::Described(_) | TransportError::Opaque => None,
        }
    }
}

/// Snapshot of the form taken when a submission starts.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub jd: String,
    pub file: Option<CvDocument>,
}

impl UploadRequest {
    pub fn from_form(form: &ApplicationForm) -> Self {
        Self {
            jd: form.job_description.clone(),
            file: form.cv_document.clone(),
        }
    }
}

/// Any HTTP response: status code plus the fully read body.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: String,
}

impl ServiceReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The remote generation service. Implement this to swap transports without
/// touching the controller.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<ServiceReply, TransportError>;
}

/// `GenerationService` over HTTP multipart.
#[derive(Clone)]
pub struct HttpGenerationService {
    client: Client,
    endpoint: Url,
}

impl HttpGenerationService {
    /// Builds the client without a request timeout; the transport's own
    /// defaults apply.
    pub fn new(endpoint: Url) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn upload(&self, request: UploadRequest) -> Result<ServiceReply, TransportError> {
        let form = build_multipart(request)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Upload endpoint answered {status} with {} bytes", body.len());

        Ok(ServiceReply { status, body })
    }
}

fn build_multipart(request: UploadRequest) -> Result<Form, TransportError> {
    let form = Form::new().text(JD_FIELD, request.jd);

    let Some(document) = request.file else {
        return Ok(form);
    };

    let part = Part::bytes(document.content.to_vec())
        .file_name(document.name)
        .mime_str(CV_MIME_TYPE)?;

    Ok(form.part(FILE_FIELD, part))
}
