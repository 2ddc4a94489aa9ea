//! Announcement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        Announcement {
            id: generate_id("announcement"),
            title: title.into(),
            body: body.into(),
            author,
            created_at: Utc::now(),
        }
    }
}

/// Store key for an announcement record.
pub fn announcement_key(announcement_id: &str) -> String {
    format!("announcements/{announcement_id}")
}
