use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::TroopDirError;
use troopdir_core::config::Troopdir;
use troopdir_core::event::{EventStatus, EventTemplate, GeneratedEvent, parse_hhmm};
use troopdir_core::persist::{event_key, persist_series};
use troopdir_core::recurrence::{RecurrenceRule, Schedule, expand, parse_form_date};
use troopdir_core::store::{Store, get_record, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum EventCommand {
    /// Add an event, optionally expanding a recurring series
    Add {
        title: String,

        /// Event date (YYYY-MM-DD); the series anchor when repeating
        #[arg(short, long)]
        date: String,

        /// Event type: meeting, camping, or event
        #[arg(short = 't', long = "type", default_value = "meeting")]
        event_type: String,

        /// Start time (HH:MM); omit for an all-day event
        #[arg(long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Team invited (repeatable): cubs, scouts, rovers
        #[arg(long = "team")]
        teams: Vec<String>,

        /// Don't collect RSVPs for this event
        #[arg(long)]
        no_rsvp: bool,

        /// Repeat interval: weekly, biweekly, or monthly
        #[arg(long)]
        repeat: Option<String>,

        /// Day of week occurrences fall on (0=Sunday..6=Saturday);
        /// required with --repeat
        #[arg(long)]
        weekday: Option<u8>,

        /// Last possible date of the series (YYYY-MM-DD, inclusive);
        /// required with --repeat
        #[arg(long)]
        until: Option<String>,

        /// Date to skip, e.g. a holiday (YYYY-MM-DD, repeatable)
        #[arg(long = "skip")]
        skip_dates: Vec<String>,
    },

    /// List events, grouped by date
    List {
        /// Only events on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only events on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Mark an event cancelled (it stays on the calendar)
    Cancel { id: String },

    /// Delete an event record entirely
    Delete { id: String },
}

pub fn run(cmd: EventCommand, store: &dyn Store, troopdir: &Troopdir) -> Result<()> {
    match cmd {
        EventCommand::Add {
            title,
            date,
            event_type,
            start,
            end,
            location,
            description,
            teams,
            no_rsvp,
            repeat,
            weekday,
            until,
            skip_dates,
        } => add(
            store, troopdir, title, date, event_type, start, end, location, description, teams,
            no_rsvp, repeat, weekday, until, skip_dates,
        ),
        EventCommand::List { from, to } => list(store, from, to),
        EventCommand::Cancel { id } => cancel(store, &id),
        EventCommand::Delete { id } => delete(store, &id),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    store: &dyn Store,
    troopdir: &Troopdir,
    title: String,
    date: String,
    event_type: String,
    start: Option<String>,
    end: Option<String>,
    location: Option<String>,
    description: Option<String>,
    teams: Vec<String>,
    no_rsvp: bool,
    repeat: Option<String>,
    weekday: Option<u8>,
    until: Option<String>,
    skip_dates: Vec<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }

    let mut template = EventTemplate::new(title, event_type.parse()?);
    template.start_time = start.as_deref().map(parse_hhmm).transpose()?;
    template.end_time = end.as_deref().map(parse_hhmm).transpose()?;
    template.location = location.unwrap_or_default();
    template.description = description.unwrap_or_default();
    template.rsvp_required = !no_rsvp;
    for team in &teams {
        // Validate the code but store it as the form string it is.
        troopdir_core::roster::parse_team(team)?;
    }
    template.teams_invited = teams;

    let schedule = match repeat {
        Some(interval) => {
            let Some(weekday) = weekday else {
                bail!("--weekday is required with --repeat");
            };
            let Some(until) = until else {
                bail!("--until is required with --repeat");
            };
            Schedule::Recurring(RecurrenceRule::from_form(
                &date,
                &until,
                &interval,
                weekday,
                &skip_dates,
            )?)
        }
        None => Schedule::Single {
            date: parse_form_date(&date)?,
        },
    };

    let mut events = expand(&template, &schedule);

    let created_at = Utc::now();
    for event in &mut events {
        event.created_by = troopdir.recorded_by().map(str::to_string);
        event.created_at = Some(created_at);
    }

    match persist_series(store, &events) {
        Ok(0) => render::warn("No occurrences in range; nothing created"),
        Ok(1) => render::success(&format!(
            "Created: {} on {}",
            events[0].template.title, events[0].date
        )),
        Ok(n) => render::success(&format!(
            "Created {n} events from {} to {}",
            events[0].date,
            events[n - 1].date
        )),
        Err(TroopDirError::PartialPersistence {
            requested,
            written,
            failed,
        }) => {
            eprintln!(
                "{}",
                format!("Wrote {written} of {requested} events").red()
            );
            for (date, reason) in &failed {
                eprintln!("  {}  {}", date.red(), reason.dimmed());
            }
            bail!("partial write; re-run with the failed dates");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn list(store: &dyn Store, from: Option<String>, to: Option<String>) -> Result<()> {
    let from = from.as_deref().map(parse_form_date).transpose()?;
    let to = to.as_deref().map(parse_form_date).transpose()?;

    let mut events: Vec<GeneratedEvent> = list_records(store, "calendar/events")?
        .into_iter()
        .map(|(_, event)| event)
        .filter(|e: &GeneratedEvent| from.is_none_or(|d| e.date >= d))
        .filter(|e| to.is_none_or(|d| e.date <= d))
        .collect();

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    if events.is_empty() {
        render::empty("No events found");
        return Ok(());
    }

    let mut current_date = None;
    for event in &events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", render::date_label(event.date).bold());
            current_date = Some(event.date);
        }

        let time = match event.template.start_time {
            Some(t) => t.format("%H:%M").to_string(),
            None => "all-day".to_string(),
        };

        let mut tags = vec![format!("[{}]", event.id)];
        if event.recurring {
            tags.push("[recurring]".to_string());
        }
        if event.template.status == EventStatus::Cancelled {
            tags.push("[cancelled]".to_string());
        }

        println!(
            "  {} {} {}",
            time,
            event.template.title,
            tags.join(" ").dimmed()
        );
    }

    Ok(())
}

fn cancel(store: &dyn Store, id: &str) -> Result<()> {
    let key = event_key(id);
    let Some(mut event) = get_record::<GeneratedEvent>(store, &key)? else {
        bail!("No event with id {id}");
    };

    event.template.status = EventStatus::Cancelled;
    put_record(store, &key, &event)?;

    render::success(&format!("Cancelled: {} on {}", event.template.title, event.date));
    Ok(())
}

fn delete(store: &dyn Store, id: &str) -> Result<()> {
    let key = event_key(id);
    if get_record::<GeneratedEvent>(store, &key)?.is_none() {
        bail!("No event with id {id}");
    }

    store.delete(&key)?;
    render::success(&format!("Deleted event {id}"));
    Ok(())
}
