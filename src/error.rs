//! Error types for the anvil client.
//!
//! This module defines `AnvilError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! All error messages are sanitized to ensure the private API key is never
//! leaked in logs or error output. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all anvil operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking sensitive information
/// like the private API key.
#[derive(Error, Debug)]
pub enum AnvilError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// Rate limited by the server (HTTP 429).
    #[error("rate limited by server - please wait before retrying")]
    RateLimited {
        /// Suggested retry delay, if provided by the server.
        retry_after: Option<Duration>,
    },

    /// Server temporarily unavailable (HTTP 502/503/504).
    #[error("service temporarily unavailable ({status})")]
    ServiceUnavailable {
        /// The specific status code.
        status: reqwest::StatusCode,
    },

    /// ConnectWise Manage returned a structured error body.
    #[error("Manage API error ({code}): {message}")]
    Api {
        /// Vendor error code (e.g. "NotFound", "InvalidObject").
        code: String,
        /// Human-readable error message from the API.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested resource was not found.
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that was not found.
        resource: String,
    },

    /// Authentication failed - likely bad keys or company identifier.
    #[error("authentication failed - check CWM_COMPANY, CWM_PUBLIC_KEY and CWM_PRIVATE_KEY")]
    Authentication,

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl AnvilError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        AnvilError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AnvilError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AnvilError::Validation(message.into())
    }

    /// Creates a not found error for a resource description.
    pub fn not_found(resource: impl Into<String>) -> Self {
        AnvilError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        AnvilError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a Manage API error from a decoded error body.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        AnvilError::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        AnvilError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Sanitizes an error message to remove any occurrence of the private key.
    ///
    /// This is critical for security - API keys must never appear in logs,
    /// error messages, or demo output.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `private_key` - The private key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the private key replaced with
    /// `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, private_key: &str) -> String {
        if private_key.is_empty() {
            return message.to_string();
        }
        message.replace(private_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    ///
    /// Use this when you need to include error details in logs or responses
    /// and want to ensure no sensitive data is leaked.
    #[must_use]
    pub fn sanitized_display(&self, private_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), private_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = AnvilError::missing_env("CWM_PRIVATE_KEY");
        assert!(err.to_string().contains("CWM_PRIVATE_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validation_error() {
        let err = AnvilError::validation("summary is required");
        assert_eq!(err.to_string(), "validation error: summary is required");
    }

    #[test]
    fn test_not_found_error() {
        let err = AnvilError::not_found("ticket 12345");
        assert_eq!(err.to_string(), "resource not found: ticket 12345");
    }

    #[test]
    fn test_timeout_error() {
        let err = AnvilError::timeout(Duration::from_secs(30), "GET /service/tickets");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn test_api_error_display() {
        let err = AnvilError::api("InvalidObject", "The board is required");
        let msg = err.to_string();
        assert!(msg.contains("InvalidObject"));
        assert!(msg.contains("The board is required"));
    }

    #[test]
    fn test_sanitize_message_removes_private_key() {
        let private_key = "super_secret_key_12345";
        let message = format!("Error connecting with key {} to server", private_key);
        let sanitized = AnvilError::sanitize_message(&message, private_key);
        assert!(!sanitized.contains(private_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        let sanitized = AnvilError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_sanitize_message_no_match() {
        let message = "Some error message";
        let sanitized = AnvilError::sanitize_message(message, "not_present");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_authentication_error_mentions_key_vars() {
        let err = AnvilError::Authentication;
        let msg = err.to_string();
        assert!(msg.contains("CWM_PUBLIC_KEY"));
        assert!(msg.contains("CWM_PRIVATE_KEY"));
    }

    #[test]
    fn test_connection_test_error() {
        let err = AnvilError::connection_test("could not reach server");
        let msg = err.to_string();
        assert!(msg.contains("connection test failed"));
        assert!(msg.contains("could not reach server"));
    }
}
