use anyhow::{Result, bail};
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::announcement::{Announcement, announcement_key};
use troopdir_core::config::Troopdir;
use troopdir_core::store::{Store, get_record, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum AnnounceCommand {
    /// Post an announcement
    Post {
        title: String,

        #[arg(short, long)]
        body: String,
    },

    /// List announcements, newest first
    List,

    /// Delete an announcement
    Delete { id: String },
}

pub fn run(cmd: AnnounceCommand, store: &dyn Store, troopdir: &Troopdir) -> Result<()> {
    match cmd {
        AnnounceCommand::Post { title, body } => {
            let announcement =
                Announcement::new(title, body, troopdir.recorded_by().map(str::to_string));

            put_record(store, &announcement_key(&announcement.id), &announcement)?;
            render::success(&format!("Posted: {}", announcement.title));
            Ok(())
        }

        AnnounceCommand::List => {
            let mut announcements: Vec<Announcement> = list_records(store, "announcements")?
                .into_iter()
                .map(|(_, a)| a)
                .collect();
            announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            if announcements.is_empty() {
                render::empty("No announcements");
                return Ok(());
            }

            for announcement in &announcements {
                println!(
                    "{} {}",
                    announcement.title.bold(),
                    format!(
                        "{} [{}]",
                        announcement.created_at.format("%Y-%m-%d"),
                        announcement.id
                    )
                    .dimmed()
                );
                println!("  {}", announcement.body);
                println!();
            }
            Ok(())
        }

        AnnounceCommand::Delete { id } => {
            let key = announcement_key(&id);
            let Some(announcement) = get_record::<Announcement>(store, &key)? else {
                bail!("No announcement with id {id}");
            };

            store.delete(&key)?;
            render::success(&format!("Deleted: {}", announcement.title));
            Ok(())
        }
    }
}
