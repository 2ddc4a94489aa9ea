//! Event RSVP records collected from the public calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TroopDirError;
use crate::event::EventType;
use crate::id::generate_id;
use crate::roster::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsvpStatus {
    Attending,
    NotAttending,
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            RsvpStatus::Attending => "attending",
            RsvpStatus::NotAttending => "not-attending",
        };
        write!(f, "{label}")
    }
}

impl FromStr for RsvpStatus {
    type Err = TroopDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attending" => Ok(RsvpStatus::Attending),
            "not-attending" => Ok(RsvpStatus::NotAttending),
            other => Err(TroopDirError::Input {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// One family's response to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: String,
    pub event_id: String,
    /// Denormalized from the event so responses stay readable even if
    /// the event record is later deleted.
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub parent_name: String,
    pub parent_email: String,
    pub scout_first_name: String,
    pub scout_last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scout_team: Option<Team>,
    pub attendance_status: RsvpStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub absent_reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_notes: String,
    pub submitted_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn new_id() -> String {
        generate_id("rsvp")
    }

    pub fn scout_name(&self) -> String {
        format!("{} {}", self.scout_first_name, self.scout_last_name)
            .trim()
            .to_string()
    }
}

/// Store key for an RSVP record.
pub fn rsvp_key(rsvp_id: &str) -> String {
    format!("calendar/rsvps/{rsvp_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rsvp(status: RsvpStatus) -> Rsvp {
        Rsvp {
            id: Rsvp::new_id(),
            event_id: "event-1".to_string(),
            event_title: "Winter Camp".to_string(),
            event_date: "2025-02-15".parse().unwrap(),
            event_type: EventType::Camping,
            parent_name: "Dana Park".to_string(),
            parent_email: "dana@example.com".to_string(),
            scout_first_name: "Jamie".to_string(),
            scout_last_name: "Park".to_string(),
            scout_team: Some(Team::Scouts),
            attendance_status: status,
            absent_reason: String::new(),
            additional_notes: String::new(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_serde_uses_form_values() {
        let rsvp = make_rsvp(RsvpStatus::NotAttending);
        let value = serde_json::to_value(&rsvp).unwrap();
        assert_eq!(value["attendanceStatus"], "not-attending");
        assert!(value.get("absentReason").is_none());
    }

    #[test]
    fn test_scout_name_joins_and_trims() {
        let mut rsvp = make_rsvp(RsvpStatus::Attending);
        assert_eq!(rsvp.scout_name(), "Jamie Park");

        rsvp.scout_last_name = String::new();
        assert_eq!(rsvp.scout_name(), "Jamie");
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }
}
