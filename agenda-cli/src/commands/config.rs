use agenda_core::CalendarId;
use agenda_core::config::AgendaConfig;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session::SNAPSHOT_FILE;

pub fn run(config: &mut AgendaConfig, set_default: Option<CalendarId>) -> Result<()> {
    if let Some(id) = set_default {
        config.default_calendar = Some(id);
        config.save()?;
        println!("{} Default calendar set to {}", "✓".green(), id);
    }

    let config_path = AgendaConfig::config_path()?;
    let data_path = config.data_path();

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Calendars:  {}", data_path.join(SNAPSHOT_FILE).display());
    println!(
        "  Selection:  {}",
        data_path.join(format!("{}.json", config.selection_key)).display()
    );

    println!("{}", "Defaults".bold());
    match config.default_calendar {
        Some(id) => println!("  Calendar:   {}", id),
        None => println!("  Calendar:   {}", "first calendar".dimmed()),
    }

    Ok(())
}
