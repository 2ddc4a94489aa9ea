use anyhow::{Result, bail};
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::store::{Store, get_record, list_records, put_record};
use troopdir_core::subscriber::{Subscriber, normalize_email, subscriber_key};

use crate::render;

#[derive(Subcommand)]
pub enum SubscriberCommand {
    /// Add a newsletter subscriber
    Add { email: String },

    /// List subscribers
    List {
        /// Include unsubscribed addresses
        #[arg(long)]
        all: bool,
    },

    /// Mark a subscriber inactive (keeps the record)
    Remove { email: String },
}

pub fn run(cmd: SubscriberCommand, store: &dyn Store) -> Result<()> {
    match cmd {
        SubscriberCommand::Add { email } => {
            let subscriber = Subscriber::new(&email)?;
            let key = subscriber_key(&subscriber.email);

            if get_record::<Subscriber>(store, &key)?.is_some_and(|s| s.active) {
                render::warn(&format!("{} is already subscribed", subscriber.email));
                return Ok(());
            }

            put_record(store, &key, &subscriber)?;
            render::success(&format!("Subscribed {}", subscriber.email));
            Ok(())
        }

        SubscriberCommand::List { all } => {
            let subscribers: Vec<Subscriber> = list_records(store, "subscribers")?
                .into_iter()
                .map(|(_, s)| s)
                .filter(|s: &Subscriber| all || s.active)
                .collect();

            if subscribers.is_empty() {
                render::empty("No subscribers");
                return Ok(());
            }

            for subscriber in &subscribers {
                let since = format!(
                    "since {}",
                    subscriber.subscribed_at.format("%Y-%m-%d")
                );
                if subscriber.active {
                    println!("  {} {}", subscriber.email, since.dimmed());
                } else {
                    println!(
                        "  {} {}",
                        subscriber.email.dimmed(),
                        "(unsubscribed)".dimmed()
                    );
                }
            }
            println!("{}", format!("{} total", subscribers.len()).dimmed());
            Ok(())
        }

        SubscriberCommand::Remove { email } => {
            let email = normalize_email(&email)?;
            let key = subscriber_key(&email);

            let Some(mut subscriber) = get_record::<Subscriber>(store, &key)? else {
                bail!("{email} is not subscribed");
            };

            subscriber.active = false;
            put_record(store, &key, &subscriber)?;
            render::success(&format!("Unsubscribed {email}"));
            Ok(())
        }
    }
}
