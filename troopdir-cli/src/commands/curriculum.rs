use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::config::Troopdir;
use troopdir_core::curriculum::{Activity, CurriculumWeek, curriculum_key};
use troopdir_core::recurrence::parse_form_date;
use troopdir_core::roster::parse_team;
use troopdir_core::store::{Store, get_record, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum CurriculumCommand {
    /// Create or update one week of a team's program
    Set {
        /// Team: cubs, scouts, or rovers
        #[arg(short, long)]
        team: String,

        /// Program year label, e.g. 2025-2026
        #[arg(short, long)]
        year: String,

        /// Week number within the program year
        #[arg(short, long)]
        week: u32,

        #[arg(long)]
        theme: Option<String>,

        /// Meeting date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        objectives: Option<String>,

        /// Activity as "name:minutes" (repeatable); replaces the week's
        /// activity list
        #[arg(long = "activity")]
        activities: Vec<String>,

        #[arg(long)]
        materials: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show one week of a team's program
    Show {
        #[arg(short, long)]
        team: String,

        #[arg(short, long)]
        year: String,

        #[arg(short, long)]
        week: u32,
    },
}

pub fn run(cmd: CurriculumCommand, store: &dyn Store, troopdir: &Troopdir) -> Result<()> {
    match cmd {
        CurriculumCommand::Set {
            team,
            year,
            week,
            theme,
            date,
            objectives,
            activities,
            materials,
            notes,
        } => {
            let team = parse_team(&team)?;
            let key = curriculum_key(team, &year, week);

            let mut plan = get_record::<CurriculumWeek>(store, &key)?
                .unwrap_or_else(|| CurriculumWeek::new(week));

            if let Some(theme) = theme {
                plan.theme = theme;
            }
            if let Some(date) = date {
                plan.meeting_date = Some(parse_form_date(&date)?);
            }
            if let Some(objectives) = objectives {
                plan.objectives = objectives;
            }
            if !activities.is_empty() {
                plan.activities = activities
                    .iter()
                    .map(|raw| parse_activity(raw))
                    .collect::<Result<_>>()?;
            }
            if let Some(materials) = materials {
                plan.materials = materials;
            }
            if let Some(notes) = notes {
                plan.notes = notes;
            }
            plan.last_modified = Utc::now();
            plan.modified_by = troopdir.recorded_by().map(str::to_string);

            put_record(store, &key, &plan)?;
            render::success(&format!(
                "Saved week {week} for {} ({year})",
                team.display_name()
            ));
            Ok(())
        }

        CurriculumCommand::Show { team, year, week } => {
            let team = parse_team(&team)?;
            let key = curriculum_key(team, &year, week);

            let Some(plan) = get_record::<CurriculumWeek>(store, &key)? else {
                render::empty("No plan for that week");
                return Ok(());
            };

            println!(
                "{} {}",
                format!("Week {}", plan.week_number).bold(),
                plan.theme.bold()
            );
            if let Some(date) = plan.meeting_date {
                println!("  {}", render::date_label(date).dimmed());
            }
            if !plan.objectives.is_empty() {
                println!("  Objectives: {}", plan.objectives);
            }
            if !plan.activities.is_empty() {
                println!("  Activities ({} min total):", plan.total_duration());
                for activity in &plan.activities {
                    println!(
                        "    {} {}",
                        activity.name,
                        format!("{} min", activity.duration).dimmed()
                    );
                }
            }
            if !plan.materials.is_empty() {
                println!("  Materials: {}", plan.materials);
            }
            if !plan.notes.is_empty() {
                println!("  Notes: {}", plan.notes);
            }

            Ok(())
        }
    }
}

/// Parse an `--activity "name:minutes"` argument; bare names get a zero
/// duration.
fn parse_activity(raw: &str) -> Result<Activity> {
    match raw.rsplit_once(':') {
        Some((name, minutes)) => {
            let duration: u32 = minutes
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid activity duration in {raw:?}"))?;
            if name.trim().is_empty() {
                bail!("activity name must not be empty in {raw:?}");
            }
            Ok(Activity {
                name: name.trim().to_string(),
                duration,
            })
        }
        None => {
            if raw.trim().is_empty() {
                bail!("activity name must not be empty");
            }
            Ok(Activity {
                name: raw.trim().to_string(),
                duration: 0,
            })
        }
    }
}
