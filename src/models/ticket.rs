//! Service ticket models for the Manage API.
//!
//! This module defines the ticket read model and the payload builder used
//! when creating tickets.

use serde::{Deserialize, Serialize};

use super::{NamedRef, Ref};

/// Record type sent when creating service tickets.
const SERVICE_TICKET_RECORD_TYPE: &str = "ServiceTicket";

/// A service ticket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket id.
    pub id: i32,

    /// One-line summary of the issue.
    #[serde(default)]
    pub summary: Option<String>,

    /// Record type (ServiceTicket, ProjectTicket, ProjectIssue).
    #[serde(default)]
    pub record_type: Option<String>,

    /// Current status on the board.
    #[serde(default)]
    pub status: Option<NamedRef>,

    /// Company the ticket belongs to.
    #[serde(default)]
    pub company: Option<NamedRef>,

    /// Service board the ticket lives on.
    #[serde(default)]
    pub board: Option<NamedRef>,

    /// Contact at the company.
    #[serde(default)]
    pub contact: Option<NamedRef>,

    /// Company site/location.
    #[serde(default)]
    pub site: Option<NamedRef>,

    /// Ticket priority.
    #[serde(default)]
    pub priority: Option<NamedRef>,
}

impl Ticket {
    /// Returns the summary or a placeholder.
    pub fn display_summary(&self) -> &str {
        self.summary.as_deref().unwrap_or("(No summary)")
    }

    /// Returns the status name or "Unknown".
    pub fn display_status(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Returns the company name or "Unknown".
    pub fn display_company(&self) -> &str {
        self.company
            .as_ref()
            .map(|c| c.display_name())
            .unwrap_or("Unknown")
    }
}

/// Payload for creating a new service ticket.
///
/// Required fields are taken at construction; optional fields are added
/// with the builder methods and omitted from the serialized body when
/// absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    /// One-line summary of the issue.
    pub summary: String,

    /// Company the ticket is created for.
    pub company: Ref,

    /// Service board to create the ticket on.
    pub board: Ref,

    /// Record type, fixed to service tickets.
    pub record_type: String,

    /// Initial description shown as the first ticket entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_description: Option<String>,

    /// Contact at the company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Ref>,

    /// Company site/location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Ref>,
}

impl NewTicket {
    /// Creates a ticket payload with the required fields.
    pub fn new(summary: impl Into<String>, company_id: i32, board_id: i32) -> Self {
        Self {
            summary: summary.into(),
            company: Ref::new(company_id),
            board: Ref::new(board_id),
            record_type: SERVICE_TICKET_RECORD_TYPE.to_string(),
            initial_description: None,
            contact: None,
            site: None,
        }
    }

    /// Sets the initial description.
    pub fn with_initial_description(mut self, description: impl Into<String>) -> Self {
        self.initial_description = Some(description.into());
        self
    }

    /// Sets the company contact.
    pub fn with_contact(mut self, contact_id: i32) -> Self {
        self.contact = Some(Ref::new(contact_id));
        self
    }

    /// Sets the company site.
    pub fn with_site(mut self, site_id: i32) -> Self {
        self.site = Some(Ref::new(site_id));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_decodes_wire_fields() {
        let body = r#"{
            "id": 101,
            "summary": "Printer not working",
            "recordType": "ServiceTicket",
            "status": {"id": 1, "name": "New"},
            "company": {"id": 2, "identifier": "AcmeInc", "name": "Acme Inc"},
            "board": {"id": 1, "name": "Service Desk"}
        }"#;

        let ticket: Ticket = serde_json::from_str(body).unwrap();
        assert_eq!(ticket.id, 101);
        assert_eq!(ticket.display_summary(), "Printer not working");
        assert_eq!(ticket.display_status(), "New");
        assert_eq!(ticket.display_company(), "Acme Inc");
        assert_eq!(ticket.record_type.as_deref(), Some("ServiceTicket"));
    }

    #[test]
    fn test_new_ticket_minimal_payload() {
        let payload = serde_json::to_value(NewTicket::new("API Test Ticket", 2, 1)).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "summary": "API Test Ticket",
                "company": {"id": 2},
                "board": {"id": 1},
                "recordType": "ServiceTicket"
            })
        );
    }

    #[test]
    fn test_new_ticket_optional_fields_included_when_set() {
        let payload = serde_json::to_value(
            NewTicket::new("API Test Ticket", 2, 1)
                .with_initial_description("Created via the API.")
                .with_contact(7)
                .with_site(9),
        )
        .unwrap();

        assert_eq!(payload["initialDescription"], "Created via the API.");
        assert_eq!(payload["contact"], serde_json::json!({"id": 7}));
        assert_eq!(payload["site"], serde_json::json!({"id": 9}));
    }

    #[test]
    fn test_new_ticket_omits_absent_optionals() {
        let payload = serde_json::to_value(NewTicket::new("API Test Ticket", 2, 1)).unwrap();
        let obj = payload.as_object().unwrap();

        assert!(!obj.contains_key("initialDescription"));
        assert!(!obj.contains_key("contact"));
        assert!(!obj.contains_key("site"));
    }
}
