//! Record id generation.
//!
//! Ids are `<prefix>-<millis>-<suffix>`: a millisecond timestamp for
//! rough ordering plus a random suffix for collision resistance.

use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Generate a unique record id with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();

    format!("{prefix}-{millis}-{suffix}")
}
