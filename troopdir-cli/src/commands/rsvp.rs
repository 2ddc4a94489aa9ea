use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::event::GeneratedEvent;
use troopdir_core::persist::event_key;
use troopdir_core::roster::parse_team;
use troopdir_core::rsvp::{Rsvp, RsvpStatus, rsvp_key};
use troopdir_core::store::{Store, get_record, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum RsvpCommand {
    /// Record a family's RSVP for an event
    Add {
        /// Event id
        event: String,

        #[arg(long)]
        parent_name: String,

        #[arg(long)]
        parent_email: String,

        #[arg(long)]
        scout_first: String,

        #[arg(long)]
        scout_last: String,

        /// Scout's team: cubs, scouts, or rovers
        #[arg(long)]
        team: Option<String>,

        /// attending or not-attending
        #[arg(short, long)]
        status: String,

        /// Reason, when not attending
        #[arg(long)]
        reason: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List RSVPs for an event
    List {
        /// Event id
        event: String,
    },
}

pub fn run(cmd: RsvpCommand, store: &dyn Store) -> Result<()> {
    match cmd {
        RsvpCommand::Add {
            event,
            parent_name,
            parent_email,
            scout_first,
            scout_last,
            team,
            status,
            reason,
            notes,
        } => {
            let Some(event) = get_record::<GeneratedEvent>(store, &event_key(&event))? else {
                bail!("No event with id {event}");
            };
            if !event.template.rsvp_required {
                render::warn(&format!(
                    "{} doesn't collect RSVPs; recording anyway",
                    event.template.title
                ));
            }

            let rsvp = Rsvp {
                id: Rsvp::new_id(),
                event_id: event.id.clone(),
                event_title: event.template.title.clone(),
                event_date: event.date,
                event_type: event.template.event_type,
                parent_name,
                parent_email,
                scout_first_name: scout_first,
                scout_last_name: scout_last,
                scout_team: team.as_deref().map(parse_team).transpose()?,
                attendance_status: status.parse()?,
                absent_reason: reason.unwrap_or_default(),
                additional_notes: notes.unwrap_or_default(),
                submitted_at: Utc::now(),
            };

            put_record(store, &rsvp_key(&rsvp.id), &rsvp)?;
            render::success(&format!(
                "RSVP recorded: {} is {} for {}",
                rsvp.scout_name(),
                rsvp.attendance_status,
                rsvp.event_title
            ));
            Ok(())
        }

        RsvpCommand::List { event } => {
            let rsvps: Vec<Rsvp> = list_records(store, "calendar/rsvps")?
                .into_iter()
                .map(|(_, rsvp)| rsvp)
                .filter(|r: &Rsvp| r.event_id == event)
                .collect();

            if rsvps.is_empty() {
                render::empty("No RSVPs for that event");
                return Ok(());
            }

            let attending = rsvps
                .iter()
                .filter(|r| r.attendance_status == RsvpStatus::Attending)
                .count();

            println!(
                "{} {}",
                rsvps[0].event_title.bold(),
                format!("({attending} of {} attending)", rsvps.len()).dimmed()
            );
            for rsvp in &rsvps {
                let status = match rsvp.attendance_status {
                    RsvpStatus::Attending => "attending".green().to_string(),
                    RsvpStatus::NotAttending => "not attending".red().to_string(),
                };
                let mut line = format!("  {} {}", rsvp.scout_name(), status);
                if !rsvp.absent_reason.is_empty() {
                    line.push_str(&format!(" {}", format!("({})", rsvp.absent_reason).dimmed()));
                }
                println!("{line}");
            }

            Ok(())
        }
    }
}
