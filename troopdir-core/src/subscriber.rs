//! Newsletter subscriber tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TroopDirError, TroopDirResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Subscriber {
    /// Build a subscriber from a raw form email.
    pub fn new(raw_email: &str) -> TroopDirResult<Self> {
        Ok(Subscriber {
            email: normalize_email(raw_email)?,
            subscribed_at: Utc::now(),
            active: true,
        })
    }
}

/// Normalize a submitted email: trim, lowercase, and require exactly one
/// `@` with non-empty local part and a dotted domain.
pub fn normalize_email(raw: &str) -> TroopDirResult<String> {
    let email = raw.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(TroopDirError::Input {
            field: "email",
            value: raw.to_string(),
        })
    }
}

/// Store key for a subscriber record, keyed by normalized email.
///
/// A normalized email can contain characters a store key cannot (`+`
/// addressing in particular), so bytes outside the key-safe set are
/// escaped as `_XX` hex. Literal `_` is escaped too, keeping distinct
/// emails on distinct keys.
pub fn subscriber_key(email: &str) -> String {
    let mut escaped = String::with_capacity(email.len());
    for byte in email.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'@' => escaped.push(byte as char),
            other => escaped.push_str(&format!("_{other:02x}")),
        }
    }
    format!("subscribers/{escaped}")
}
