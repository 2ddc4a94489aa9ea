//! Weekly attendance records and summaries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TroopDirError;
use crate::roster::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Excused => "excused",
        };
        write!(f, "{label}")
    }
}

impl FromStr for AttendanceStatus {
    type Err = TroopDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "excused" => Ok(AttendanceStatus::Excused),
            other => Err(TroopDirError::Input {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// One scout's attendance at one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub team: Team,
    pub scout_id: String,
    pub scout_name: String,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<String>,
}

/// Store key for an attendance record. Session dates are underscored so
/// each session is one directory level.
pub fn attendance_key(team: Team, date: NaiveDate, scout_id: &str) -> String {
    format!(
        "attendance/{}/{}/{}",
        team.code(),
        date.format("%Y_%m_%d"),
        scout_id
    )
}

/// Per-scout attendance totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub excused: u32,
}

impl AttendanceSummary {
    pub fn record(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    /// Attendance rate as a whole percentage, rounded half-up.
    /// Zero sessions means a rate of zero.
    pub fn rate(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.present * 100 + self.total / 2) / self.total
        }
    }
}

/// Aggregate attendance records into per-scout summaries, keyed by
/// scout id.
pub fn summarize<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> BTreeMap<String, AttendanceSummary> {
    let mut summaries: BTreeMap<String, AttendanceSummary> = BTreeMap::new();

    for record in records {
        summaries
            .entry(record.scout_id.clone())
            .or_default()
            .record(record.status);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(scout_id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: date.parse().unwrap(),
            team: Team::Cubs,
            scout_id: scout_id.to_string(),
            scout_name: "Robin Banks".to_string(),
            status,
            recorded_by: Some("admin".to_string()),
        }
    }

    #[test]
    fn test_attendance_key_underscores_date() {
        let key = attendance_key(
            Team::Scouts,
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            "scout-1",
        );
        assert_eq!(key, "attendance/scouts/2025_01_07/scout-1");
    }

    #[test]
    fn test_summarize_counts_per_scout() {
        let records = vec![
            make_record("a", "2025-01-07", AttendanceStatus::Present),
            make_record("a", "2025-01-14", AttendanceStatus::Absent),
            make_record("a", "2025-01-21", AttendanceStatus::Present),
            make_record("b", "2025-01-07", AttendanceStatus::Excused),
        ];

        let summaries = summarize(&records);

        let a = summaries["a"];
        assert_eq!((a.total, a.present, a.absent, a.excused), (3, 2, 1, 0));
        assert_eq!(a.rate(), 67);

        let b = summaries["b"];
        assert_eq!((b.total, b.excused), (1, 1));
        assert_eq!(b.rate(), 0);
    }

    #[test]
    fn test_rate_rounds_half_up() {
        let mut summary = AttendanceSummary::default();
        summary.record(AttendanceStatus::Present);
        summary.record(AttendanceStatus::Absent);
        assert_eq!(summary.rate(), 50);

        let empty = AttendanceSummary::default();
        assert_eq!(empty.rate(), 0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "present".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Present
        );
        assert!("tardy".parse::<AttendanceStatus>().is_err());
    }
}
