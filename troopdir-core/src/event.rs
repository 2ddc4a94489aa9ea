//! Calendar event records.
//!
//! `EventTemplate` is an admin form submission before any dates are
//! attached; `GeneratedEvent` is one concrete dated record as persisted
//! to the store. Expansion from one to the other lives in
//! [`crate::recurrence`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TroopDirError, TroopDirResult};
use crate::id::generate_id;

/// What kind of calendar entry this is. Carried as an opaque tag through
/// expansion; the public calendar uses it to pick the right RSVP form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Camping,
    Event,
}

impl std::str::FromStr for EventType {
    type Err = TroopDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(EventType::Meeting),
            "camping" => Ok(EventType::Camping),
            "event" => Ok(EventType::Event),
            other => Err(TroopDirError::Input {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Cancelled,
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Active
    }
}

/// An event as entered in the admin form, before dates are attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Start time of day, or None for an all-day event.
    #[serde(default, with = "hhmm")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub teams_invited: Vec<String>,
    #[serde(default = "default_true")]
    pub rsvp_required: bool,
    #[serde(default)]
    pub status: EventStatus,
}

fn default_true() -> bool {
    true
}

impl EventTemplate {
    pub fn new(title: impl Into<String>, event_type: EventType) -> Self {
        EventTemplate {
            title: title.into(),
            event_type,
            start_time: None,
            end_time: None,
            description: String::new(),
            location: String::new(),
            teams_invited: Vec::new(),
            rsvp_required: true,
            status: EventStatus::Active,
        }
    }
}

/// A concrete dated event record, ready to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEvent {
    pub id: String,
    pub date: NaiveDate,
    /// True for every record of a multi-occurrence series.
    pub recurring: bool,
    #[serde(flatten)]
    pub template: EventTemplate,
    /// Provenance, stamped by the caller before persisting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GeneratedEvent {
    /// A one-off event on a single date.
    pub fn single(template: &EventTemplate, date: NaiveDate) -> Self {
        Self::build(template, date, false)
    }

    /// One occurrence of a recurring series.
    pub fn occurrence(template: &EventTemplate, date: NaiveDate) -> Self {
        Self::build(template, date, true)
    }

    fn build(template: &EventTemplate, date: NaiveDate, recurring: bool) -> Self {
        GeneratedEvent {
            id: generate_id("event"),
            date,
            recurring,
            template: template.clone(),
            created_by: None,
            created_at: None,
        }
    }
}

/// Parse a `"HH:MM"` 24-hour form time.
pub fn parse_hhmm(s: &str) -> TroopDirResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| TroopDirError::Input {
        field: "time",
        value: s.to_string(),
    })
}

/// Serde adapter for optional `"HH:MM"` times. Empty strings and null
/// both mean all-day, matching what the form emits.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, "%H:%M")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
