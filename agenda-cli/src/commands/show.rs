use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::{Value, json};

use crate::render::Render;
use crate::session::Session;

pub fn run(session: &Session, as_json: bool) -> Result<()> {
    let store = session.store();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&json_output(session))?);
        return Ok(());
    }

    if store.selected_calendars().is_empty() {
        println!("{}", "No calendars selected".dimmed());
        return Ok(());
    }

    for calendar in store.selected_calendars() {
        println!("{}", calendar.render());
    }
    println!();

    if store.events().is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in store.events() {
        println!("  {}", event.render());
    }

    Ok(())
}

/// The selected ids plus the rendered events, each carrying its calendar's template.
fn json_output(session: &Session) -> Value {
    let store = session.store();
    json!({
        "selected": store.selected_ids(),
        "eventos": store.events(),
    })
}
