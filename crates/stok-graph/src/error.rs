//! Errors surfaced by remote resource calls.

use thiserror::Error;

use stok_core::error::{AppError, ErrorKind};

/// A failed remote call: either the request never completed, or the
/// service answered with a status the operation does not accept.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request failed in transit (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service returned a non-accepted status; the raw response body
    /// is preserved verbatim.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl HttpError {
    /// The status code, when the response got far enough to have one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

impl From<HttpError> for AppError {
    fn from(err: HttpError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Http, message, err)
    }
}

/// Accept only an exact 204 No Content.
///
/// Any other status is a failure, including nominal success codes: a 200
/// with a body is a partial-success shape the delete contract rejects.
pub fn ensure_no_content(status: u16, body: String) -> Result<(), HttpError> {
    if status == 204 {
        Ok(())
    } else {
        Err(HttpError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_is_success() {
        assert!(ensure_no_content(204, String::new()).is_ok());
    }

    #[test]
    fn test_ok_with_body_is_failure() {
        let err = ensure_no_content(200, "{\"status\":\"partial\"}".to_string()).unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn test_not_found_is_failure() {
        let err = ensure_no_content(404, "item gone".to_string()).unwrap_err();
        match err {
            HttpError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "item gone");
            }
            HttpError::Transport(_) => panic!("expected status error"),
        }
    }

    #[test]
    fn test_converts_to_app_error_with_http_kind() {
        let err: AppError = ensure_no_content(500, "boom".to_string()).unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Http);
        assert!(err.message.contains("500"));
        assert!(err.message.contains("boom"));
    }
}
