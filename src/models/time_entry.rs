//! Time entry models for the Manage API.
//!
//! Time entries record member hours against a charge target (usually a
//! service ticket) for billing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NamedRef, Ref};

/// Default billable option when none is supplied.
const DEFAULT_BILLABLE_OPTION: &str = "Billable";

/// Wire format for time entry timestamps.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A timestamp accepted by the time entry payload builder.
///
/// Manage expects textual timestamps. Preformatted strings pass through
/// unchanged; `chrono` date-times are rendered as `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// A preformatted timestamp, sent verbatim.
    Text(String),
    /// A date-time, rendered to the wire format on serialization.
    Moment(DateTime<Utc>),
}

impl TimeValue {
    /// Returns the textual form sent on the wire.
    pub fn as_wire(&self) -> String {
        match self {
            TimeValue::Text(s) => s.clone(),
            TimeValue::Moment(dt) => dt.format(TIME_FORMAT).to_string(),
        }
    }
}

impl Serialize for TimeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_wire())
    }
}

impl From<DateTime<Utc>> for TimeValue {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeValue::Moment(dt)
    }
}

impl From<String> for TimeValue {
    fn from(s: String) -> Self {
        TimeValue::Text(s)
    }
}

impl From<&str> for TimeValue {
    fn from(s: &str) -> Self {
        TimeValue::Text(s.to_string())
    }
}

/// Record type a time entry is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargeToType {
    /// A service ticket.
    ServiceTicket,
    /// A project ticket.
    ProjectTicket,
    /// A charge code.
    ChargeCode,
    /// A schedule activity.
    Activity,
}

/// A recorded time entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Unique time entry id.
    pub id: i32,

    /// Company the time is billed to.
    #[serde(default)]
    pub company: Option<NamedRef>,

    /// Id of the record the time is charged against.
    #[serde(default)]
    pub charge_to_id: Option<i32>,

    /// Type of the charged record.
    #[serde(default)]
    pub charge_to_type: Option<String>,

    /// Member who logged the time.
    #[serde(default)]
    pub member: Option<NamedRef>,

    /// Start of the time window.
    #[serde(default)]
    pub time_start: Option<String>,

    /// End of the time window.
    #[serde(default)]
    pub time_end: Option<String>,

    /// Hours actually worked.
    #[serde(default)]
    pub actual_hours: Option<f64>,

    /// Billable option (Billable, DoNotBill, NoCharge, NoDefault).
    #[serde(default)]
    pub billable_option: Option<String>,

    /// Work type.
    #[serde(default)]
    pub work_type: Option<NamedRef>,

    /// Work role.
    #[serde(default)]
    pub work_role: Option<NamedRef>,

    /// Notes on the work performed.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimeEntry {
    /// Returns the member name or "Unknown".
    pub fn display_member(&self) -> &str {
        self.member
            .as_ref()
            .map(|m| m.display_name())
            .unwrap_or("Unknown")
    }

    /// Returns the hours worked, defaulting to zero.
    pub fn hours(&self) -> f64 {
        self.actual_hours.unwrap_or(0.0)
    }
}

/// Payload for creating a time entry.
///
/// Required fields are taken at construction; `billableOption` defaults to
/// `Billable` and `notes` is omitted when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    /// Company the time is billed to.
    pub company: Ref,

    /// Id of the record the time is charged against.
    pub charge_to_id: i32,

    /// Type of the charged record.
    pub charge_to_type: ChargeToType,

    /// Member logging the time.
    pub member: Ref,

    /// Start of the time window.
    pub time_start: TimeValue,

    /// End of the time window.
    pub time_end: TimeValue,

    /// Hours actually worked.
    pub actual_hours: f64,

    /// Work type.
    pub work_type: Ref,

    /// Work role.
    pub work_role: Ref,

    /// Billable option.
    pub billable_option: String,

    /// Notes on the work performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTimeEntry {
    /// Creates a time entry payload with the required fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        company_id: i32,
        charge_to_id: i32,
        charge_to_type: ChargeToType,
        member_id: i32,
        time_start: impl Into<TimeValue>,
        time_end: impl Into<TimeValue>,
        actual_hours: f64,
        work_type_id: i32,
        work_role_id: i32,
    ) -> Self {
        Self {
            company: Ref::new(company_id),
            charge_to_id,
            charge_to_type,
            member: Ref::new(member_id),
            time_start: time_start.into(),
            time_end: time_end.into(),
            actual_hours,
            work_type: Ref::new(work_type_id),
            work_role: Ref::new(work_role_id),
            billable_option: DEFAULT_BILLABLE_OPTION.to_string(),
            notes: None,
        }
    }

    /// Sets the billable option (e.g. "DoNotBill").
    pub fn with_billable_option(mut self, option: impl Into<String>) -> Self {
        self.billable_option = option.into();
        self
    }

    /// Sets the work notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_value_moment_renders_wire_format() {
        let dt = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        let value = TimeValue::from(dt);
        assert_eq!(value.as_wire(), "2024-02-01T09:30:00Z");
    }

    #[test]
    fn test_time_value_text_passes_through() {
        let value = TimeValue::from("2024-02-01T09:30:00Z");
        assert_eq!(value.as_wire(), "2024-02-01T09:30:00Z");

        // Odd preformatted values are the caller's responsibility
        let odd = TimeValue::from("yesterday");
        assert_eq!(odd.as_wire(), "yesterday");
    }

    #[test]
    fn test_charge_to_type_serializes_as_string() {
        let json = serde_json::to_value(ChargeToType::ServiceTicket).unwrap();
        assert_eq!(json, serde_json::json!("ServiceTicket"));
    }

    #[test]
    fn test_new_time_entry_payload_shape() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

        let payload = serde_json::to_value(NewTimeEntry::new(
            2,
            101,
            ChargeToType::ServiceTicket,
            17,
            start,
            end,
            1.0,
            1,
            1,
        ))
        .unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "company": {"id": 2},
                "chargeToId": 101,
                "chargeToType": "ServiceTicket",
                "member": {"id": 17},
                "timeStart": "2024-02-01T08:00:00Z",
                "timeEnd": "2024-02-01T09:00:00Z",
                "actualHours": 1.0,
                "workType": {"id": 1},
                "workRole": {"id": 1},
                "billableOption": "Billable"
            })
        );
    }

    #[test]
    fn test_new_time_entry_notes_and_billable_override() {
        let payload = serde_json::to_value(
            NewTimeEntry::new(
                2,
                101,
                ChargeToType::ServiceTicket,
                17,
                "2024-02-01T08:00:00Z",
                "2024-02-01T09:00:00Z",
                1.0,
                1,
                1,
            )
            .with_notes("Replaced the toner")
            .with_billable_option("DoNotBill"),
        )
        .unwrap();

        assert_eq!(payload["notes"], "Replaced the toner");
        assert_eq!(payload["billableOption"], "DoNotBill");
    }

    #[test]
    fn test_time_entry_decodes_wire_fields() {
        let body = r#"{
            "id": 900,
            "company": {"id": 2, "name": "Acme Inc"},
            "chargeToId": 101,
            "chargeToType": "ServiceTicket",
            "member": {"id": 17, "identifier": "jdoe", "name": "John Doe"},
            "timeStart": "2024-02-01T08:00:00Z",
            "timeEnd": "2024-02-01T09:00:00Z",
            "actualHours": 1.0,
            "billableOption": "Billable"
        }"#;

        let entry: TimeEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.id, 900);
        assert_eq!(entry.display_member(), "John Doe");
        assert_eq!(entry.hours(), 1.0);
        assert_eq!(entry.charge_to_type.as_deref(), Some("ServiceTicket"));
    }
}
