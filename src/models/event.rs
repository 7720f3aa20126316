use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

pub const STATUS_ACTIVE: &str = "Active";

/// A row of the `events` table, serialized with its column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub category: Option<String>,
    pub recurrence: Option<String>,
    pub end_date: Option<String>,
    /// JSON-encoded array of dates.
    pub recurrence_dates: Option<String>,
    pub status: Option<String>,
}

/// Body of `POST /` and `PUT /:id`. Nothing is required and no field is
/// type-checked; values are coerced to column text on the way in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub location: Option<Value>,
    pub organizer: Option<Value>,
    pub category: Option<Value>,
    pub recurrence: Option<Value>,
    pub end_date: Option<Value>,
    pub recurrence_dates: Option<Value>,
}

/// The ten writable columns, ready to bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub category: Option<String>,
    pub recurrence: Option<String>,
    pub end_date: Option<String>,
    pub recurrence_dates: Option<String>,
}

/// Strings are stored verbatim, other values as their JSON text.
fn column_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl EventPayload {
    /// Falsy `endDate` becomes NULL; `recurrenceDates` is stored as JSON
    /// text whatever its shape.
    pub fn into_fields(self) -> EventFields {
        EventFields {
            title: column_text(self.title),
            description: column_text(self.description),
            date: column_text(self.date),
            time: column_text(self.time),
            location: column_text(self.location),
            organizer: column_text(self.organizer),
            category: column_text(self.category),
            recurrence: column_text(self.recurrence),
            end_date: column_text(self.end_date.filter(|d| !is_falsy(d))),
            recurrence_dates: self
                .recurrence_dates
                .filter(|d| !d.is_null())
                .map(|d| d.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveRequest {
    pub status: Option<Value>,
}

impl ArchiveRequest {
    pub fn is_reactivation(&self) -> bool {
        self.status.as_ref().and_then(Value::as_str) == Some(STATUS_ACTIVE)
    }

    pub fn status_text(&self) -> Option<String> {
        column_text(self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STATUS_ARCHIVED: &str = "Archived";

    fn payload(value: Value) -> EventPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_payload_accepts_camel_case_and_missing_fields() {
        let fields = payload(json!({
            "title": "Standup",
            "endDate": "2024-06-01",
            "recurrenceDates": ["2024-03-08", "2024-03-15"]
        }))
        .into_fields();

        assert_eq!(fields.title.as_deref(), Some("Standup"));
        assert_eq!(fields.end_date.as_deref(), Some("2024-06-01"));
        assert!(fields.location.is_none());
    }

    #[test]
    fn test_non_string_values_are_coerced_to_text() {
        let fields = payload(json!({
            "time": 900,
            "location": true,
            "organizer": { "name": "Alice" },
            "recurrenceDates": "2024-01-01"
        }))
        .into_fields();

        assert_eq!(fields.time.as_deref(), Some("900"));
        assert_eq!(fields.location.as_deref(), Some("true"));
        assert_eq!(fields.organizer.as_deref(), Some(r#"{"name":"Alice"}"#));
        assert_eq!(fields.recurrence_dates.as_deref(), Some(r#""2024-01-01""#));
    }

    #[test]
    fn test_falsy_end_date_and_missing_recurrence_become_null() {
        for end_date in [json!(""), json!(0), json!(false), Value::Null] {
            let fields = payload(json!({ "endDate": end_date, "recurrenceDates": null }))
                .into_fields();
            assert_eq!(fields.end_date, None);
            assert_eq!(fields.recurrence_dates, None);
        }
        assert_eq!(EventPayload::default().into_fields(), EventFields::default());
    }

    #[test]
    fn test_recurrence_dates_keep_order() {
        let stored = payload(json!({ "recurrenceDates": ["2024-02-01", "2024-01-01"] }))
            .into_fields()
            .recurrence_dates
            .unwrap();
        assert_eq!(stored, r#"["2024-02-01","2024-01-01"]"#);

        let decoded: Vec<String> = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, vec!["2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_event_serializes_column_names() {
        let event = Event {
            id: 7,
            title: Some("Standup".into()),
            description: None,
            date: None,
            time: None,
            location: None,
            organizer: None,
            category: None,
            recurrence: None,
            end_date: Some("2024-06-01".into()),
            recurrence_dates: None,
            status: Some(STATUS_ACTIVE.into()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["endDate"], "2024-06-01");
        assert!(json["recurrenceDates"].is_null());
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn test_archive_request_branches() {
        let active = ArchiveRequest {
            status: Some(json!(STATUS_ACTIVE)),
        };
        let archived = ArchiveRequest {
            status: Some(json!(STATUS_ARCHIVED)),
        };
        assert!(active.is_reactivation());
        assert!(!archived.is_reactivation());
        assert_eq!(archived.status_text().as_deref(), Some(STATUS_ARCHIVED));
        assert!(!ArchiveRequest::default().is_reactivation());
        assert_eq!(ArchiveRequest::default().status_text(), None);
    }
}
