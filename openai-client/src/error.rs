//! Remote-boundary error taxonomy, classified from `async_openai` errors so
//! callers can map each kind to a user-facing message.

use async_openai::error::OpenAIError;
use thiserror::Error;

/// Failure modes of the remote OpenAI-compatible boundary.
#[derive(Error, Debug)]
pub enum OpenAIApiError {
    #[error("OpenAI rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("OpenAI invalid request: {0}")]
    InvalidRequest(String),

    #[error("OpenAI request failed: {0}")]
    Api(String),

    #[error("No image URL in response")]
    NoImageUrl,
}

/// Maps an `async_openai` error onto the taxonomy. Rate-limit and
/// invalid-request conditions are recognized from the API error type/message;
/// everything else is an opaque remote failure.
pub(crate) fn classify(err: OpenAIError) -> OpenAIApiError {
    match err {
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.as_deref().unwrap_or("");
            let message = api.message.clone();
            if kind.contains("rate_limit")
                || kind == "insufficient_quota"
                || message.to_lowercase().contains("rate limit")
            {
                OpenAIApiError::RateLimited(message)
            } else if kind == "invalid_request_error" {
                OpenAIApiError::InvalidRequest(message)
            } else {
                OpenAIApiError::Api(message)
            }
        }
        OpenAIError::InvalidArgument(msg) => OpenAIApiError::InvalidRequest(msg),
        other => OpenAIApiError::Api(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    fn api_error(kind: Option<&str>, message: &str) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: kind.map(String::from),
            param: None,
            code: None,
        })
    }

    #[test]
    fn test_classify_rate_limited() {
        let e = classify(api_error(Some("rate_limit_exceeded"), "slow down"));
        assert!(matches!(e, OpenAIApiError::RateLimited(_)));

        let e = classify(api_error(None, "Rate limit reached for requests"));
        assert!(matches!(e, OpenAIApiError::RateLimited(_)));
    }

    #[test]
    fn test_classify_invalid_request() {
        let e = classify(api_error(Some("invalid_request_error"), "bad model"));
        assert!(matches!(e, OpenAIApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_unknown_is_api() {
        let e = classify(api_error(Some("server_error"), "boom"));
        assert!(matches!(e, OpenAIApiError::Api(_)));
    }
}
