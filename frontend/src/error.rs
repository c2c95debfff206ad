use shared::ErrorBody;

pub const GENERIC_PREDICT_ERROR: &str = "An error occurred during prediction";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build request: {0}")]
    Request(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
    #[error("Server error: {status} - {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a `Server` error from a non-2xx response, keeping the
    /// service's own `error` text when the body carries one.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .map(|msg| msg.trim().to_string())
            .filter(|msg| !msg.is_empty());

        ApiError::Server { status, message }
    }

    /// Text for the error banner. Only the server's own message is shown
    /// verbatim; everything else collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(message), .. } => message.clone(),
            _ => GENERIC_PREDICT_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ApiError::from_response_body(400, r#"{"error":"corrupt image"}"#);
        assert_eq!(err, ApiError::Server { status: 400, message: Some("corrupt image".into()) });
        assert_eq!(err.user_message(), "corrupt image");
        assert_eq!(err.to_string(), "Server error: 400 - corrupt image");
    }

    #[test]
    fn test_missing_or_blank_message_uses_fallback() {
        for body in ["", "<html>Bad Gateway</html>", "{}", r#"{"error":"  "}"#, r#"{"error":null}"#] {
            let err = ApiError::from_response_body(502, body);
            assert_eq!(err.user_message(), GENERIC_PREDICT_ERROR, "body: {body}");
        }
    }

    #[test]
    fn test_transport_errors_use_fallback() {
        assert_eq!(ApiError::Network("offline".into()).user_message(), GENERIC_PREDICT_ERROR);
        assert_eq!(ApiError::Timeout(30_000).user_message(), GENERIC_PREDICT_ERROR);
        assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_PREDICT_ERROR);
        assert_eq!(ApiError::Timeout(30_000).to_string(), "Request timed out after 30000 ms");
    }
}
