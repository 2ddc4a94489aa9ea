use anyhow::{Result, bail};
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::id::generate_id;
use troopdir_core::recurrence::parse_form_date;
use troopdir_core::roster::{Grade, Scout, Team, parse_team, scout_key};
use troopdir_core::store::{Store, get_record, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum ScoutCommand {
    /// Add a scout to the roster
    Add {
        first_name: String,
        last_name: String,

        /// School grade (number, or "post-secondary")
        #[arg(short, long)]
        grade: String,

        /// Explicit team assignment; overrides the grade classification
        #[arg(short, long)]
        team: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,

        #[arg(long)]
        parent_name: Option<String>,

        #[arg(long)]
        parent_email: Option<String>,

        #[arg(long)]
        parent_phone: Option<String>,

        #[arg(long)]
        emergency_contact: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List the roster, grouped by team
    List {
        /// Only this team: cubs, scouts, or rovers
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Remove a scout from the roster
    Remove { id: String },
}

pub fn run(cmd: ScoutCommand, store: &dyn Store) -> Result<()> {
    match cmd {
        ScoutCommand::Add {
            first_name,
            last_name,
            grade,
            team,
            birth_date,
            parent_name,
            parent_email,
            parent_phone,
            emergency_contact,
            notes,
        } => {
            let grade = grade
                .parse::<u8>()
                .map(Grade::Year)
                .unwrap_or(Grade::Label(grade));
            let team = team.as_deref().map(parse_team).transpose()?;
            let birth_date = birth_date.as_deref().map(parse_form_date).transpose()?;

            let scout = Scout {
                id: generate_id("scout"),
                first_name,
                last_name,
                grade,
                team,
                birth_date,
                parent_name,
                parent_email,
                parent_phone,
                emergency_contact,
                notes,
            };

            put_record(store, &scout_key(&scout.id), &scout)?;

            match scout.team() {
                Some(team) => render::success(&format!(
                    "Added {} (grade {}, {})",
                    scout.full_name(),
                    scout.grade,
                    team.display_name()
                )),
                None => {
                    render::success(&format!("Added {}", scout.full_name()));
                    render::warn(&format!(
                        "Grade {} doesn't map to a team; assign one with --team",
                        scout.grade
                    ));
                }
            }
            println!("  id: {}", scout.id.dimmed());
            Ok(())
        }

        ScoutCommand::List { team } => {
            let filter = team.as_deref().map(parse_team).transpose()?;
            let scouts: Vec<Scout> = list_records(store, "scouts")?
                .into_iter()
                .map(|(_, scout)| scout)
                .collect();

            if scouts.is_empty() {
                render::empty("The roster is empty");
                return Ok(());
            }

            for team in Team::ALL {
                if filter.is_some_and(|f| f != team) {
                    continue;
                }

                let mut members: Vec<&Scout> =
                    scouts.iter().filter(|s| s.team() == Some(team)).collect();
                members.sort_by(|a, b| {
                    (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
                });

                if members.is_empty() && filter.is_none() {
                    continue;
                }

                println!(
                    "{} {}",
                    team.display_name().bold(),
                    format!("(grades {})", team.grade_range()).dimmed()
                );
                for scout in members {
                    println!(
                        "  {} {} {}",
                        scout.full_name(),
                        format!("grade {}", scout.grade).dimmed(),
                        format!("[{}]", scout.id).dimmed()
                    );
                }
                println!();
            }

            if filter.is_none() {
                let unassigned: Vec<&Scout> =
                    scouts.iter().filter(|s| s.team().is_none()).collect();
                if !unassigned.is_empty() {
                    println!("{}", "Unassigned".bold());
                    for scout in unassigned {
                        println!(
                            "  {} {}",
                            scout.full_name(),
                            format!("grade {}", scout.grade).dimmed()
                        );
                    }
                }
            }

            Ok(())
        }

        ScoutCommand::Remove { id } => {
            let key = scout_key(&id);
            let Some(scout) = get_record::<Scout>(store, &key)? else {
                bail!("No scout with id {id}");
            };

            store.delete(&key)?;
            render::success(&format!("Removed {}", scout.full_name()));
            Ok(())
        }
    }
}
