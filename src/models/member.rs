//! Member models for the Manage API.
//!
//! Members are the staff accounts that own tickets and log time. The
//! authenticated account endpoint returns the same shape.

use serde::Deserialize;

/// A member (staff account).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique member id.
    pub id: i32,

    /// Login identifier.
    #[serde(default)]
    pub identifier: Option<String>,

    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email_address: Option<String>,

    /// Job title.
    #[serde(default)]
    pub title: Option<String>,

    /// Whether the member is inactive.
    #[serde(default)]
    pub inactive_flag: Option<bool>,
}

impl Member {
    /// Returns "First Last", falling back to the identifier.
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self
                .identifier
                .clone()
                .unwrap_or_else(|| format!("member {}", self.id)),
        }
    }

    /// Returns the login identifier or a placeholder.
    pub fn display_identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_full_name() {
        let member: Member = serde_json::from_str(
            r#"{"id": 17, "identifier": "jdoe", "firstName": "John", "lastName": "Doe"}"#,
        )
        .unwrap();
        assert_eq!(member.full_name(), "John Doe");
        assert_eq!(member.display_identifier(), "jdoe");
    }

    #[test]
    fn test_member_full_name_falls_back() {
        let member: Member = serde_json::from_str(r#"{"id": 17, "identifier": "jdoe"}"#).unwrap();
        assert_eq!(member.full_name(), "jdoe");

        let bare: Member = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(bare.full_name(), "member 17");
    }

    #[test]
    fn test_member_decodes_inactive_flag() {
        let member: Member =
            serde_json::from_str(r#"{"id": 17, "inactiveFlag": false}"#).unwrap();
        assert_eq!(member.inactive_flag, Some(false));
    }
}
