use anyhow::Result;
use owo_colors::OwoColorize;
use troopdir_core::config::{Troopdir, TroopdirConfig};

pub fn run(troopdir: &Troopdir) -> Result<()> {
    let config_path = TroopdirConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Records:  {}", troopdir.data_path().display());

    println!();
    println!("{}", "Identity".bold());
    println!(
        "  Recorded by:  {}",
        troopdir.recorded_by().unwrap_or("(not set)")
    );

    Ok(())
}
