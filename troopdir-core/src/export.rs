//! CSV report generation.

use std::collections::BTreeMap;

use crate::attendance::{AttendanceRecord, AttendanceSummary};
use crate::error::{TroopDirError, TroopDirResult};
use crate::roster::Scout;

/// Roster export, one row per scout.
pub fn roster_csv(scouts: &[Scout]) -> TroopDirResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "First Name",
        "Last Name",
        "Grade",
        "Birth Date",
        "Parent Name",
        "Parent Email",
        "Parent Phone",
        "Emergency Contact",
        "Notes",
    ])?;

    for scout in scouts {
        writer.write_record([
            scout.first_name.clone(),
            scout.last_name.clone(),
            scout.grade.to_string(),
            scout
                .birth_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            scout.parent_name.clone().unwrap_or_default(),
            scout.parent_email.clone().unwrap_or_default(),
            scout.parent_phone.clone().unwrap_or_default(),
            scout.emergency_contact.clone().unwrap_or_default(),
            scout.notes.clone().unwrap_or_default(),
        ])?;
    }

    finish(writer)
}

/// Attendance log export, one row per recorded session entry.
pub fn attendance_csv(records: &[AttendanceRecord]) -> TroopDirResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date",
        "Team",
        "Scout ID",
        "Scout Name",
        "Status",
        "Recorded By",
    ])?;

    for record in records {
        writer.write_record([
            record.date.to_string(),
            record.team.display_name().to_string(),
            record.scout_id.clone(),
            record.scout_name.clone(),
            record.status.to_string(),
            record.recorded_by.clone().unwrap_or_default(),
        ])?;
    }

    finish(writer)
}

/// Per-scout attendance summary export. Scouts with no recorded sessions
/// get a zero row; team falls back to the grade classification.
pub fn attendance_summary_csv(
    scouts: &[Scout],
    summaries: &BTreeMap<String, AttendanceSummary>,
) -> TroopDirResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Scout Name",
        "Grade",
        "Team",
        "Total Sessions",
        "Present",
        "Absent",
        "Excused",
        "Attendance Rate",
    ])?;

    for scout in scouts {
        let summary = summaries.get(&scout.id).copied().unwrap_or_default();
        let team = scout
            .team()
            .map(|t| t.display_name())
            .unwrap_or("Unknown Team");

        writer.write_record([
            scout.full_name(),
            scout.grade.to_string(),
            team.to_string(),
            summary.total.to_string(),
            summary.present.to_string(),
            summary.absent.to_string(),
            summary.excused.to_string(),
            format!("{}%", summary.rate()),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> TroopDirResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| TroopDirError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TroopDirError::Serialization(e.to_string()))
}
