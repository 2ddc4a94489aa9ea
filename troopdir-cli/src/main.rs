mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use troopdir_core::config::Troopdir;

#[derive(Parser)]
#[command(name = "troopdir")]
#[command(about = "Administer your troop's calendar, roster, and records from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar events, including recurring series
    #[command(subcommand)]
    Event(commands::event::EventCommand),

    /// Scout roster
    #[command(subcommand)]
    Scout(commands::scout::ScoutCommand),

    /// Weekly attendance
    #[command(subcommand)]
    Attendance(commands::attendance::AttendanceCommand),

    /// Event RSVPs
    #[command(subcommand)]
    Rsvp(commands::rsvp::RsvpCommand),

    /// Announcements
    #[command(subcommand)]
    Announce(commands::announce::AnnounceCommand),

    /// Newsletter subscribers
    #[command(subcommand)]
    Subscriber(commands::subscriber::SubscriberCommand),

    /// Weekly curriculum plans
    #[command(subcommand)]
    Curriculum(commands::curriculum::CurriculumCommand),

    /// Photo gallery records
    #[command(subcommand)]
    Gallery(commands::gallery::GalleryCommand),

    /// CSV exports
    #[command(subcommand)]
    Export(commands::export::ExportCommand),

    /// Show configuration paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let troopdir = Troopdir::load()?;
    let store = troopdir.store();

    match cli.command {
        Commands::Event(cmd) => commands::event::run(cmd, &store, &troopdir),
        Commands::Scout(cmd) => commands::scout::run(cmd, &store),
        Commands::Attendance(cmd) => commands::attendance::run(cmd, &store, &troopdir),
        Commands::Rsvp(cmd) => commands::rsvp::run(cmd, &store),
        Commands::Announce(cmd) => commands::announce::run(cmd, &store, &troopdir),
        Commands::Subscriber(cmd) => commands::subscriber::run(cmd, &store),
        Commands::Curriculum(cmd) => commands::curriculum::run(cmd, &store, &troopdir),
        Commands::Gallery(cmd) => commands::gallery::run(cmd, &store),
        Commands::Export(cmd) => commands::export::run(cmd, &store),
        Commands::Config => commands::config::run(&troopdir),
    }
}
