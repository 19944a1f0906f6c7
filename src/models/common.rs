//! Common types shared across Manage API models.
//!
//! This module defines the reference objects and error envelope used by
//! multiple API endpoints.

use serde::{Deserialize, Serialize};

/// A reference to another entity, as returned by the Manage API.
///
/// Most Manage fields that point at other records (status, board, company,
/// member, ...) use this consistent id/identifier/name structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    /// Unique identifier.
    #[serde(default)]
    pub id: Option<i32>,

    /// Short identifier (login name, company abbreviation, ...).
    #[serde(default)]
    pub identifier: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedRef {
    /// Returns the name if present, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.identifier.as_deref())
            .unwrap_or("Unknown")
    }
}

/// A bare id reference used when constructing create payloads.
///
/// Manage accepts `{"id": N}` wherever a record reference is required.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Ref {
    /// The referenced record id.
    pub id: i32,
}

impl Ref {
    /// Creates a reference to the given record id.
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

impl From<i32> for Ref {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Error envelope returned by the Manage API on failed requests.
///
/// Non-2xx responses usually carry a JSON body with a vendor error code
/// and a human-readable message.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Vendor error code (e.g. "NotFound", "Unauthorized", "InvalidObject").
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Attempts to decode an error envelope from a raw response body.
    ///
    /// Returns `None` when the body is not JSON or carries neither a code
    /// nor a message.
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: ApiError = serde_json::from_str(body).ok()?;
        if parsed.code.is_none() && parsed.message.is_none() {
            None
        } else {
            Some(parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_ref_display_name() {
        let named = NamedRef {
            id: Some(1),
            identifier: Some("acme".to_string()),
            name: Some("Acme Inc".to_string()),
        };
        assert_eq!(named.display_name(), "Acme Inc");

        let identifier_only = NamedRef {
            id: Some(1),
            identifier: Some("acme".to_string()),
            name: None,
        };
        assert_eq!(identifier_only.display_name(), "acme");

        let empty = NamedRef {
            id: None,
            identifier: None,
            name: None,
        };
        assert_eq!(empty.display_name(), "Unknown");
    }

    #[test]
    fn test_ref_serializes_to_id_object() {
        let json = serde_json::to_value(Ref::new(42)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 42}));
    }

    #[test]
    fn test_api_error_from_body() {
        let body = r#"{"code":"NotFound","message":"Record not found"}"#;
        let err = ApiError::from_body(body).unwrap();
        assert_eq!(err.code.as_deref(), Some("NotFound"));
        assert_eq!(err.message.as_deref(), Some("Record not found"));
    }

    #[test]
    fn test_api_error_from_body_rejects_non_envelope() {
        assert!(ApiError::from_body("not json").is_none());
        assert!(ApiError::from_body("{}").is_none());
        assert!(ApiError::from_body(r#"{"unrelated": true}"#).is_none());
    }
}
