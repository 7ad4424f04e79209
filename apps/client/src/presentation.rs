//! Result Presentation — renders a `SessionState` to text. No state, no side effects.

use serde::Serialize;

use crate::controller::{SessionState, SubmissionStatus};

pub const TITLE: &str = "LLM Writes Job Applications";
pub const GENERATE_LABEL: &str = "Generate application";
pub const GENERATING_LABEL: &str = "Generating...";
pub const NO_CV_HINT: &str = "Upload a PDF CV to start.";
pub const EMPTY_OUTPUT: &str = "Your generated text will appear here.";

/// Whether the generate trigger accepts input.
pub fn submit_enabled(state: &SessionState) -> bool {
    state.form.can_submit() && !state.in_flight
}

pub fn trigger_label(state: &SessionState) -> &'static str {
    if state.in_flight {
        GENERATING_LABEL
    } else {
        GENERATE_LABEL
    }
}

pub fn cv_hint(state: &SessionState) -> String {
    match state.form.document_name() {
        Some(name) => format!("CV loaded: {name}"),
        None => NO_CV_HINT.to_string(),
    }
}

/// One-line status, with a pulse marker while in flight.
pub fn status_line(state: &SessionState) -> String {
    let pulse = if state.in_flight { " …" } else { "" };
    format!("Session Status: {}{pulse}", state.status)
}

/// The full page: header, form summary, trigger, error and output panel.
pub fn render(state: &SessionState) -> String {
    let mut out = String::new();

    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&status_line(state));
    out.push('\n');
    out.push_str(&cv_hint(state));
    out.push_str("\n\n");

    let jd_chars = state.form.job_description.chars().count();
    out.push_str(&format!("Job description: {jd_chars} characters\n"));

    let disabled = if submit_enabled(state) { "" } else { " (disabled)" };
    out.push_str(&format!("[{}]{disabled}\n", trigger_label(state)));

    if let Some(error) = state.outcome.error_message.as_deref().filter(|e| !e.is_empty()) {
        out.push_str(&format!("Error: {error}\n"));
    }

    out.push_str("\n── Generated response (plain text) ──\n");
    match state.outcome.result_text.as_deref().filter(|r| !r.is_empty()) {
        Some(result) => {
            out.push_str(result);
            if !result.ends_with('\n') {
                out.push('\n');
            }
        }
        None => {
            out.push_str(EMPTY_OUTPUT);
            out.push('\n');
        }
    }

    out
}

/// Short line printed by the watcher on every status change.
pub fn transition_line(state: &SessionState) -> String {
    match state.status {
        SubmissionStatus::Submitting => format!("{} [{}]", status_line(state), trigger_label(state)),
        _ => status_line(state),
    }
}

/// Machine-readable view of a session, for `--json` output.
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub status: SubmissionStatus,
    pub cv_document: Option<&'a str>,
    pub result_text: Option<&'a str>,
    pub error_message: Option<&'a str>,
}

impl<'a> From<&'a SessionState> for SessionReport<'a> {
    fn from(state: &'a SessionState) -> Self {
        Self {
            status: state.status,
            cv_document: state.form.document_name(),
            result_text: state.outcome.result_text.as_deref(),
            error_message: state.outcome.error_message.as_deref(),
        }
    }
}
