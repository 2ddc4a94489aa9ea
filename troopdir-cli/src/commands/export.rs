use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use troopdir_core::attendance::{AttendanceRecord, summarize};
use troopdir_core::export::{attendance_csv, attendance_summary_csv, roster_csv};
use troopdir_core::roster::{Scout, parse_team};
use troopdir_core::store::{Store, list_records};

use crate::render;

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Export the full roster as CSV
    Roster {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export the attendance log as CSV
    Attendance {
        /// Only this team: cubs, scouts, or rovers
        #[arg(short, long)]
        team: Option<String>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export per-scout attendance summaries as CSV
    Summary {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn run(cmd: ExportCommand, store: &dyn Store) -> Result<()> {
    match cmd {
        ExportCommand::Roster { out } => {
            let scouts = load_scouts(store)?;
            write_output(&roster_csv(&scouts)?, out)
        }

        ExportCommand::Attendance { team, out } => {
            let filter = team.as_deref().map(parse_team).transpose()?;

            let mut records: Vec<AttendanceRecord> = list_records(store, "attendance")?
                .into_iter()
                .map(|(_, record)| record)
                .filter(|r: &AttendanceRecord| filter.is_none_or(|t| r.team == t))
                .collect();
            records.sort_by(|a, b| {
                (a.date, a.team, &a.scout_id).cmp(&(b.date, b.team, &b.scout_id))
            });

            write_output(&attendance_csv(&records)?, out)
        }

        ExportCommand::Summary { out } => {
            let scouts = load_scouts(store)?;
            let records: Vec<AttendanceRecord> = list_records(store, "attendance")?
                .into_iter()
                .map(|(_, record)| record)
                .collect();

            let summaries = summarize(&records);
            write_output(&attendance_summary_csv(&scouts, &summaries)?, out)
        }
    }
}

fn load_scouts(store: &dyn Store) -> Result<Vec<Scout>> {
    let mut scouts: Vec<Scout> = list_records(store, "scouts")?
        .into_iter()
        .map(|(_, scout)| scout)
        .collect();
    scouts.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
    Ok(scouts)
}

fn write_output(csv: &str, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, csv)?;
            render::success(&format!("Wrote {}", path.display()));
        }
        None => print!("{csv}"),
    }
    Ok(())
}
