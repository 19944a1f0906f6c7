//! Company models for the Manage API.
//!
//! Companies are the customer records tickets and time entries are billed
//! against.

use serde::Deserialize;

use super::NamedRef;

/// A company record.
///
/// Manage returns many more fields than listed here; we capture the ones
/// needed for display and for wiring up tickets and time entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique company id.
    pub id: i32,

    /// Short identifier (e.g. "AcmeInc").
    #[serde(default)]
    pub identifier: Option<String>,

    /// Company display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Company status (Active, Inactive, ...).
    #[serde(default)]
    pub status: Option<NamedRef>,

    /// Main phone number.
    #[serde(default)]
    pub phone_number: Option<String>,

    /// Company website.
    #[serde(default)]
    pub website: Option<String>,

    /// City from the primary address.
    #[serde(default)]
    pub city: Option<String>,

    /// Sales territory.
    #[serde(default)]
    pub territory: Option<NamedRef>,
}

impl Company {
    /// Returns the company name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.identifier.as_deref())
            .unwrap_or("(Unnamed company)")
    }

    /// Returns the status name or "Unknown".
    pub fn display_status(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_decodes_wire_fields() {
        let body = r#"{
            "id": 2,
            "identifier": "AcmeInc",
            "name": "Acme Inc",
            "status": {"id": 1, "name": "Active"},
            "phoneNumber": "555-0100",
            "website": "https://acme.example",
            "city": "Springfield"
        }"#;

        let company: Company = serde_json::from_str(body).unwrap();
        assert_eq!(company.id, 2);
        assert_eq!(company.display_name(), "Acme Inc");
        assert_eq!(company.display_status(), "Active");
        assert_eq!(company.phone_number.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_company_display_name_falls_back_to_identifier() {
        let company: Company =
            serde_json::from_str(r#"{"id": 3, "identifier": "AcmeInc"}"#).unwrap();
        assert_eq!(company.display_name(), "AcmeInc");
    }
}
