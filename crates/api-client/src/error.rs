use reqwest::StatusCode;

/// Failure modes of a single API round trip.
///
/// Every operation performs exactly one request — there is no retry layer, so
/// each variant maps 1:1 to what happened on the wire.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure before any response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The request hit the client-side timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },

    /// The response body could not be decoded into the expected type.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short, user-displayable form of the error.
    pub fn display_message(&self) -> String {
        match self {
            Self::Network(msg) => format!("Network error: {msg}"),
            Self::Timeout => "Request timed out".to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Decode(msg) => format!("Unexpected response: {msg}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend answers errors as `{"detail": "..."}` (FastAPI style) or
/// `{"error": "..."}`; fall back to the raw body, then to the bare status.
pub(crate) fn http_error(status: StatusCode, body: &str) -> ApiError {
    let backend_message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str().map(String::from))
        });

    let message = match backend_message {
        Some(msg) => msg,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("request failed with status {status}"),
    };

    ApiError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_backend_detail() {
        let err = http_error(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"No log IDs provided for summarization."}"#,
        );
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "No log IDs provided for summarization.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn http_error_accepts_error_field() {
        let err = http_error(StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#);
        assert_eq!(err.display_message(), "bad key");
    }

    #[test]
    fn http_error_falls_back_to_raw_body() {
        let err = http_error(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(err.display_message(), "upstream unavailable");
    }

    #[test]
    fn http_error_falls_back_to_status_when_body_empty() {
        let err = http_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(err.display_message().contains("500"));
    }
}
