use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session::Session;

pub fn run(session: &Session, as_json: bool) -> Result<()> {
    let store = session.store();

    if as_json {
        println!("{}", serde_json::to_string_pretty(store.calendars())?);
        return Ok(());
    }

    if store.calendars().is_empty() {
        println!(
            "{}",
            "No calendars yet. Add one with: agenda add-calendar '{\"id\": 1, \"nombre\": \"Personal\"}'"
                .dimmed()
        );
        return Ok(());
    }

    for calendar in store.calendars() {
        let marker = if store.is_selected(calendar.id) {
            "●".green().to_string()
        } else {
            "○".dimmed().to_string()
        };
        println!("{} {}", marker, calendar.render());
    }

    Ok(())
}
