use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Shown when the backend gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a backend call.
///
/// Messages coming from the backend are opaque display strings and are shown
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable, connection reset, DNS failure.
    #[error("Unable to reach the server: {0}")]
    Transport(String),
    #[error("The server did not respond in time")]
    Timeout,
    /// Any other non-2xx answer.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    /// The body did not have a shape we understand.
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response from its status and body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(message_from_body)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Transport-level failures: the request never produced a response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

fn message_from_body(body: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_is_verbatim() {
        let err = ApiError::from_response(
            StatusCode::CONFLICT,
            br#"{"message":"Course has enrolled students"}"#,
        );
        assert_eq!(err, ApiError::Conflict("Course has enrolled students".to_string()));
        assert_eq!(err.to_string(), "Course has enrolled students");
    }

    #[test]
    fn test_missing_message_falls_back_to_generic() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: GENERIC_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_error_field_is_used_for_not_found() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, br#"{"error":"No such FAQ"}"#);
        assert_eq!(err, ApiError::NotFound("No such FAQ".to_string()));
    }
}
