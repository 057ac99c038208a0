use crate::types::GraphQLError;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

pub const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// `body` is an excerpt of at most [`BODY_EXCERPT_CHARS`] characters
    #[error("GraphQL API error: HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("GraphQL request failed: {message}")]
    Transport { message: String, retryable: bool },

    #[error("GraphQL query returned errors: {}", join_messages(.errors))]
    GraphQl { errors: Vec<GraphQLError> },

    #[error("GraphQL request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not decode GraphQL response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Non-success HTTP response, keeping only the start of the body
    pub fn upstream(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(BODY_EXCERPT_CHARS) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Self::Upstream { status, body }
    }

    /// Stable error code surfaced to tool callers
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Upstream { .. } | Self::Transport { .. } | Self::Decode(_) => "UPSTREAM_ERROR",
            Self::GraphQl { .. } => "GRAPHQL_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidRequest(_) => "SYNTAX_ERROR",
        }
    }

    /// Server errors, rate limiting, connect failures and timeouts are worth another attempt
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status >= 500 || *status == 429,
            Self::Transport { retryable, .. } => *retryable,
            Self::Timeout(_) => true,
            Self::GraphQl { .. } | Self::InvalidRequest(_) | Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Transport {
            retryable: err.is_connect() || err.is_timeout(),
            message: err.to_string(),
        }
    }
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        let upstream = |status| ClientError::Upstream {
            status,
            body: String::new(),
        };
        assert!(upstream(503).is_retryable());
        assert!(upstream(500).is_retryable());
        assert!(upstream(429).is_retryable());
        assert!(!upstream(404).is_retryable());
        assert!(!upstream(401).is_retryable());
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!ClientError::GraphQl { errors: Vec::new() }.is_retryable());
    }

    #[test]
    fn test_upstream_keeps_body_out_of_message() {
        let err = ClientError::upstream(502, &"<html>".repeat(200));
        assert_eq!(err.to_string(), "GraphQL API error: HTTP 502");
        match err {
            ClientError::Upstream { body, .. } => {
                assert_eq!(body.chars().count(), BODY_EXCERPT_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match ClientError::upstream(404, "not here") {
            ClientError::Upstream { body, .. } => assert_eq!(body, "not here"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::Timeout(Duration::ZERO).code(), "TIMEOUT");
        assert_eq!(
            ClientError::InvalidRequest("x".into()).code(),
            "SYNTAX_ERROR"
        );
        assert_eq!(
            ClientError::GraphQl { errors: Vec::new() }.code(),
            "GRAPHQL_ERROR"
        );
    }
}
