//! Scout roster records and team classification.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TroopDirError, TroopDirResult};

/// Age-group team a scout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Cubs,
    Scouts,
    Rovers,
}

impl Team {
    pub const ALL: [Team; 3] = [Team::Cubs, Team::Scouts, Team::Rovers];

    /// Classify a school grade into a team: grades 3-6 are cubs, 7-10
    /// scouts, 11 and up (including post-secondary) rovers. Anything
    /// else is unassigned.
    pub fn for_grade(grade: &Grade) -> Option<Team> {
        match grade {
            Grade::Label(label) if label == "post-secondary" => Some(Team::Rovers),
            Grade::Label(_) => None,
            Grade::Year(year) if *year >= 11 => Some(Team::Rovers),
            Grade::Year(year) if (7..=10).contains(year) => Some(Team::Scouts),
            Grade::Year(year) if (3..=6).contains(year) => Some(Team::Cubs),
            Grade::Year(_) => None,
        }
    }

    /// The short code used in store keys and form values.
    pub fn code(&self) -> &'static str {
        match self {
            Team::Cubs => "cubs",
            Team::Scouts => "scouts",
            Team::Rovers => "rovers",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Cubs => "Cubs & Brownies",
            Team::Scouts => "Scouts",
            Team::Rovers => "Rovers",
        }
    }

    pub fn grade_range(&self) -> &'static str {
        match self {
            Team::Cubs => "3-6",
            Team::Scouts => "7-10",
            Team::Rovers => "11+",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Team {
    type Err = TroopDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cubs" => Ok(Team::Cubs),
            "scouts" => Ok(Team::Scouts),
            "rovers" => Ok(Team::Rovers),
            other => Err(TroopDirError::Input {
                field: "team",
                value: other.to_string(),
            }),
        }
    }
}

/// School grade as entered on the form: a numeric year, or a label like
/// "post-secondary".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Year(u8),
    Label(String),
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Grade::Year(year) => write!(f, "{year}"),
            Grade::Label(label) => write!(f, "{label}"),
        }
    }
}

impl FromStr for Grade {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u8>() {
            Ok(year) => Ok(Grade::Year(year)),
            Err(_) => Ok(Grade::Label(s.to_string())),
        }
    }
}

/// A scout on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scout {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub grade: Grade,
    /// Explicit team assignment; overrides the grade classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Scout {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Resolved team: the explicit assignment if set, otherwise the
    /// grade classification.
    pub fn team(&self) -> Option<Team> {
        self.team.or_else(|| Team::for_grade(&self.grade))
    }
}

/// Store key for a roster record.
pub fn scout_key(scout_id: &str) -> String {
    format!("scouts/{scout_id}")
}

/// Parse a form team code, reporting the rejected value on failure.
pub fn parse_team(code: &str) -> TroopDirResult<Team> {
    code.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_scout(grade: Grade) -> Scout {
        Scout {
            id: "scout-1".to_string(),
            first_name: "Robin".to_string(),
            last_name: "Banks".to_string(),
            grade,
            team: None,
            birth_date: None,
            parent_name: None,
            parent_email: None,
            parent_phone: None,
            emergency_contact: None,
            notes: None,
        }
    }

    #[test]
    fn test_grade_classification() {
        assert_eq!(Team::for_grade(&Grade::Year(3)), Some(Team::Cubs));
        assert_eq!(Team::for_grade(&Grade::Year(6)), Some(Team::Cubs));
        assert_eq!(Team::for_grade(&Grade::Year(7)), Some(Team::Scouts));
        assert_eq!(Team::for_grade(&Grade::Year(10)), Some(Team::Scouts));
        assert_eq!(Team::for_grade(&Grade::Year(11)), Some(Team::Rovers));
        assert_eq!(
            Team::for_grade(&Grade::Label("post-secondary".to_string())),
            Some(Team::Rovers)
        );
        assert_eq!(Team::for_grade(&Grade::Year(2)), None);
        assert_eq!(Team::for_grade(&Grade::Label("homeschool".to_string())), None);
    }

    #[test]
    fn test_explicit_team_wins_over_grade() {
        let mut scout = make_scout(Grade::Year(4));
        assert_eq!(scout.team(), Some(Team::Cubs));

        scout.team = Some(Team::Rovers);
        assert_eq!(scout.team(), Some(Team::Rovers));
    }

    #[test]
    fn test_grade_serde_is_number_or_label() {
        let scout = make_scout(Grade::Year(8));
        let value = serde_json::to_value(&scout).unwrap();
        assert_eq!(value["grade"], 8);

        let scout = make_scout(Grade::Label("post-secondary".to_string()));
        let value = serde_json::to_value(&scout).unwrap();
        assert_eq!(value["grade"], "post-secondary");

        let back: Scout = serde_json::from_value(value).unwrap();
        assert_eq!(back.team(), Some(Team::Rovers));
    }

    #[test]
    fn test_unknown_team_code_reports_value() {
        let err = parse_team("beavers").unwrap_err();
        assert!(err.to_string().contains("beavers"));
    }
}
