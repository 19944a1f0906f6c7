//! Ticket note models for the Manage API.
//!
//! Notes are the discussion entries on a service ticket. They can be
//! internal (technician-only) or part of the customer-facing discussion,
//! and can be flagged as the detail description or the resolution.

use serde::{Deserialize, Serialize};

use super::NamedRef;

/// A note attached to a service ticket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketNote {
    /// Unique note id.
    pub id: i32,

    /// Id of the ticket this note belongs to.
    #[serde(default)]
    pub ticket_id: Option<i32>,

    /// Note text.
    #[serde(default)]
    pub text: Option<String>,

    /// Whether the note is internal (not visible to the customer).
    #[serde(default)]
    pub internal_flag: Option<bool>,

    /// Whether the note is part of the detail description.
    #[serde(default)]
    pub detail_description_flag: Option<bool>,

    /// Whether the note is flagged as the resolution.
    #[serde(default)]
    pub resolution_flag: Option<bool>,

    /// Member who wrote the note.
    #[serde(default)]
    pub member: Option<NamedRef>,

    /// Who created the note (login identifier).
    #[serde(default)]
    pub created_by: Option<String>,

    /// When the note was created.
    #[serde(default)]
    pub date_created: Option<String>,
}

impl TicketNote {
    /// Returns the note text or a placeholder.
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or("(No text)")
    }

    /// Returns who created the note.
    pub fn display_created_by(&self) -> &str {
        self.created_by
            .as_deref()
            .or_else(|| self.member.as_ref().map(|m| m.display_name()))
            .unwrap_or("Unknown")
    }
}

/// Payload for adding a note to a ticket.
///
/// The three flags are always serialized; Manage treats an absent flag the
/// same as `false`, but the original integration sends the full trio and we
/// keep the wire shape identical.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// Note text.
    pub text: String,

    /// Whether the note is internal. Defaults to true.
    pub internal_flag: bool,

    /// Whether the note is part of the detail description. Defaults to false.
    pub detail_description_flag: bool,

    /// Whether the note is flagged as the resolution. Defaults to false.
    pub resolution_flag: bool,
}

impl NewNote {
    /// Creates an internal note with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            internal_flag: true,
            detail_description_flag: false,
            resolution_flag: false,
        }
    }

    /// Sets whether the note is internal.
    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal_flag = internal;
        self
    }

    /// Sets whether the note is part of the detail description.
    pub fn with_detail_description(mut self, detail: bool) -> Self {
        self.detail_description_flag = detail;
        self
    }

    /// Sets whether the note is flagged as the resolution.
    pub fn with_resolution(mut self, resolution: bool) -> Self {
        self.resolution_flag = resolution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_decodes_wire_fields() {
        let body = r#"{
            "id": 555,
            "ticketId": 101,
            "text": "Called the customer.",
            "internalFlag": true,
            "detailDescriptionFlag": false,
            "createdBy": "jdoe",
            "dateCreated": "2024-02-01T09:30:00Z"
        }"#;

        let note: TicketNote = serde_json::from_str(body).unwrap();
        assert_eq!(note.id, 555);
        assert_eq!(note.ticket_id, Some(101));
        assert_eq!(note.display_text(), "Called the customer.");
        assert_eq!(note.display_created_by(), "jdoe");
        assert_eq!(note.internal_flag, Some(true));
    }

    #[test]
    fn test_new_note_defaults() {
        let payload = serde_json::to_value(NewNote::new("Test note")).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "text": "Test note",
                "internalFlag": true,
                "detailDescriptionFlag": false,
                "resolutionFlag": false
            })
        );
    }

    #[test]
    fn test_new_note_flag_overrides() {
        let payload = serde_json::to_value(
            NewNote::new("Fixed by replacing the toner.")
                .with_internal(false)
                .with_resolution(true),
        )
        .unwrap();

        assert_eq!(payload["internalFlag"], false);
        assert_eq!(payload["resolutionFlag"], true);
        assert_eq!(payload["detailDescriptionFlag"], false);
    }
}
