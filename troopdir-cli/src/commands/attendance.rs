use anyhow::{Result, bail};
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::attendance::{AttendanceRecord, AttendanceStatus, attendance_key};
use troopdir_core::config::Troopdir;
use troopdir_core::recurrence::parse_form_date;
use troopdir_core::roster::{Scout, parse_team, scout_key};
use troopdir_core::store::{Store, get_record, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum AttendanceCommand {
    /// Record one scout's attendance for a session
    Record {
        /// Scout id
        scout: String,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// present, absent, or excused
        #[arg(short, long)]
        status: String,
    },

    /// Show one session's attendance for a team
    List {
        /// Team: cubs, scouts, or rovers
        #[arg(short, long)]
        team: String,

        /// Session date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
}

pub fn run(cmd: AttendanceCommand, store: &dyn Store, troopdir: &Troopdir) -> Result<()> {
    match cmd {
        AttendanceCommand::Record {
            scout,
            date,
            status,
        } => {
            let date = parse_form_date(&date)?;
            let status: AttendanceStatus = status.parse()?;

            let Some(scout) = get_record::<Scout>(store, &scout_key(&scout))? else {
                bail!("No scout with id {scout}");
            };
            let Some(team) = scout.team() else {
                bail!(
                    "{} has no team; set one with `troopdir scout add --team`",
                    scout.full_name()
                );
            };

            let record = AttendanceRecord {
                date,
                team,
                scout_id: scout.id.clone(),
                scout_name: scout.full_name(),
                status,
                recorded_by: troopdir.recorded_by().map(str::to_string),
            };

            put_record(store, &attendance_key(team, date, &scout.id), &record)?;
            render::success(&format!(
                "{}: {} marked {status}",
                date,
                scout.full_name()
            ));
            Ok(())
        }

        AttendanceCommand::List { team, date } => {
            let team = parse_team(&team)?;
            let date = parse_form_date(&date)?;

            let prefix = format!(
                "attendance/{}/{}",
                team.code(),
                date.format("%Y_%m_%d")
            );
            let records: Vec<AttendanceRecord> = list_records(store, &prefix)?
                .into_iter()
                .map(|(_, record)| record)
                .collect();

            if records.is_empty() {
                render::empty("No attendance recorded for that session");
                return Ok(());
            }

            println!(
                "{} {}",
                render::date_label(date).bold(),
                team.display_name().bold()
            );
            for record in &records {
                let status = match record.status {
                    AttendanceStatus::Present => "present".green().to_string(),
                    AttendanceStatus::Absent => "absent".red().to_string(),
                    AttendanceStatus::Excused => "excused".yellow().to_string(),
                };
                println!("  {} {}", record.scout_name, status);
            }

            Ok(())
        }
    }
}
