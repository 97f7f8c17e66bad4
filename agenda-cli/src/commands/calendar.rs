use agenda_core::{AgendaError, Calendar};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::parse_record;
use crate::render::Render;
use crate::session::Session;

/// Add a calendar the server just created. It becomes the only selection.
pub fn add(session: &mut Session, record: &str) -> Result<()> {
    let calendar: Calendar = parse_record(record)?;

    session.store_mut().add_calendar(calendar.clone());
    session.save()?;

    println!("{} {}", "+".green(), calendar.render());
    Ok(())
}

pub fn update(session: &mut Session, record: &str) -> Result<()> {
    let calendar: Calendar = parse_record(record)?;
    let id = calendar.id;

    if session.store().calendar(id).is_none() {
        return Err(AgendaError::CalendarNotFound(id).into());
    }

    session.store_mut().update_calendar(calendar);
    session.save()?;

    if let Some(updated) = session.store().calendar(id) {
        println!("{} {}", "~".yellow(), updated.render());
    }
    Ok(())
}
