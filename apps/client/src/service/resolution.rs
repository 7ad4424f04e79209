//! Maps the outcome of one upload call onto exactly one of three resolutions.

use super::{ServiceReply, TransportError};

/// Shown when a transport failure carries no usable description.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// 2xx: the body is the generated application text, verbatim.
    Generated(String),
    /// Non-2xx: the remote service rejected the submission.
    Rejected { status: u16, message: String },
    /// No response was obtained or its body could not be read.
    Unreachable(String),
}

impl From<Result<ServiceReply, TransportError>> for Resolution {
    fn from(result: Result<ServiceReply, TransportError>) -> Self {
        match result {
            Ok(reply) if reply.is_success() => Resolution::Generated(reply.body),
            Ok(reply) => Resolution::Rejected {
                status: reply.status,
                message: rejection_message(reply.status, reply.body),
            },
            Err(e) => Resolution::Unreachable(
                e.description()
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ),
        }
    }
}

/// Non-empty bodies are surfaced verbatim, whitespace included.
fn rejection_message(status: u16, body: String) -> String {
    if body.is_empty() {
        format!("Request failed ({status})")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> Result<ServiceReply, TransportError> {
        Ok(ServiceReply {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_success_body_is_returned_verbatim() {
        let resolution = Resolution::from(reply(200, "Dear Hiring Manager...\n"));
        assert_eq!(
            resolution,
            Resolution::Generated("Dear Hiring Manager...\n".to_string())
        );
    }

    #[test]
    fn test_empty_success_body_is_still_generated() {
        assert_eq!(
            Resolution::from(reply(201, "")),
            Resolution::Generated(String::new())
        );
    }

    #[test]
    fn test_rejection_with_body_uses_body() {
        assert_eq!(
            Resolution::from(reply(422, "Job description too short")),
            Resolution::Rejected {
                status: 422,
                message: "Job description too short".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_without_body_synthesizes_message() {
        assert_eq!(
            Resolution::from(reply(500, "")),
            Resolution::Rejected {
                status: 500,
                message: "Request failed (500)".to_string()
            }
        );
    }

    #[test]
    fn test_redirect_status_counts_as_rejection() {
        let resolution = Resolution::from(reply(304, ""));
        assert!(matches!(resolution, Resolution::Rejected { status: 304, .. }));
    }

    #[test]
    fn test_transport_failure_with_description() {
        let resolution = Resolution::from(Err(TransportError::Described(
            "connection reset by peer".to_string(),
        )));
        assert_eq!(
            resolution,
            Resolution::Unreachable("connection reset by peer".to_string())
        );
    }

    #[test]
    fn test_transport_failure_without_description_uses_fallback() {
        assert_eq!(
            Resolution::from(Err(TransportError::Opaque)),
            Resolution::Unreachable(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }
}
