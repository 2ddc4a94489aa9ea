//! Weekly curriculum plans, per team and program year.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::Team;

/// One activity in a weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: u32,
}

/// One week of a team's program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumWeek {
    pub week_number: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<NaiveDate>,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub materials: String,
    #[serde(default)]
    pub notes: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

impl CurriculumWeek {
    pub fn new(week_number: u32) -> Self {
        CurriculumWeek {
            week_number,
            theme: String::new(),
            meeting_date: None,
            objectives: String::new(),
            activities: Vec::new(),
            materials: String::new(),
            notes: String::new(),
            last_modified: Utc::now(),
            modified_by: None,
        }
    }

    /// Total planned minutes across all activities.
    pub fn total_duration(&self) -> u32 {
        self.activities.iter().map(|a| a.duration).sum()
    }
}

/// Store key for a curriculum week. Program years are labels like
/// "2025-2026".
pub fn curriculum_key(team: Team, program_year: &str, week_number: u32) -> String {
    format!("curriculum/{}/{program_year}/week{week_number}", team.code())
}
