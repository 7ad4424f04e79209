//! Submission Controller — owns the status state machine and the session state.
//!
//! Flow: snapshot form → clear outcome + `Submitting` → upload (the only
//! suspension point) → resolve → final status/outcome + in-flight cleared.
//!
//! All state lives in a `watch` channel. Every logical mutation is one
//! `send_modify`, so subscribers only ever see fully applied transitions.
//! `submit` and `reset` take `&mut self`: a second submission cannot start
//! while one is outstanding.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::form::{ApplicationForm, CvDocument};
use crate::service::resolution::Resolution;
use crate::service::{GenerationService, UploadRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Complete,
    Failed,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Idle => "Idle",
            SubmissionStatus::Submitting => "Submitting",
            SubmissionStatus::Complete => "Complete",
            SubmissionStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// At most one of the two fields is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub result_text: Option<String>,
    pub error_message: Option<String>,
}

impl SubmissionOutcome {
    fn clear(&mut self) {
        self.result_text = None;
        self.error_message = None;
    }
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub form: ApplicationForm,
    pub status: SubmissionStatus,
    pub outcome: SubmissionOutcome,
    /// True exactly while an upload is outstanding.
    pub in_flight: bool,
}

impl SessionState {
    fn begin_attempt(&mut self) {
        self.outcome.clear();
        self.status = SubmissionStatus::Submitting;
        self.in_flight = true;
    }

    fn finish_attempt(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Generated(text) => {
                self.outcome.result_text = Some(text);
                self.status = SubmissionStatus::Complete;
            }
            Resolution::Rejected { message, .. } | Resolution::Unreachable(message) => {
                self.outcome.error_message = Some(message);
                self.status = SubmissionStatus::Failed;
            }
        }
        // last, after status and outcome are final
        self.in_flight = false;
    }
}

pub struct SubmissionController {
    service: Arc<dyn GenerationService>,
    state: watch::Sender<SessionState>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { service, state }
    }

    /// Subscribes an observer. The receiver always holds the latest state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.borrow().status
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.form.set_job_description(text));
    }

    /// Appends one line of text, as when pasting line by line.
    pub fn append_job_description_line(&mut self, line: &str) {
        self.state.send_modify(|s| {
            let jd = &mut s.form.job_description;
            if !jd.is_empty() {
                jd.push('\n');
            }
            jd.push_str(line);
        });
    }

    pub fn select_document(&mut self, document: Option<CvDocument>) {
        self.state.send_modify(|s| s.form.select_document(document));
    }

    /// Submits the current form and waits for the attempt to resolve.
    ///
    /// The caller gates this on `can_submit`; it is not re-checked here.
    /// Every path ends in `Complete` or `Failed`; nothing is returned as an error.
    pub async fn submit(&mut self) -> SubmissionStatus {
        let attempt = Uuid::new_v4();

        self.state.send_modify(SessionState::begin_attempt);

        let request = UploadRequest::from_form(&self.state.borrow().form);
        info!(
            %attempt,
            jd_chars = request.jd.chars().count(),
            document = request.file.as_ref().map(|d| d.name.as_str()).unwrap_or("none"),
            "Submitting application request"
        );

        let resolution = Resolution::from(self.service.upload(request).await);

        match &resolution {
            Resolution::Generated(text) => {
                info!(%attempt, chars = text.chars().count(), "Generation complete")
            }
            Resolution::Rejected { status, message } => {
                warn!(%attempt, status, "Generation rejected: {message}")
            }
            Resolution::Unreachable(message) => {
                warn!(%attempt, "Generation service unreachable: {message}")
            }
        }

        self.state.send_modify(|s| s.finish_attempt(resolution));
        self.status()
    }

    /// Back to `Idle` with an empty description and outcome. The CV is kept
    /// so it can be reused for the next job description.
    pub fn reset(&mut self) {
        self.state.send_modify(|s| {
            s.form.job_description.clear();
            s.outcome.clear();
            s.status = SubmissionStatus::Idle;
        });
        info!("Session reset");
    }
}
