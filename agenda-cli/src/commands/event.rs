use agenda_core::{AgendaError, Event, EventId, EventPatch};
use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::commands::parse_record;
use crate::render::Render;
use crate::session::Session;

pub fn add(session: &mut Session, record: &str) -> Result<()> {
    let event: Event = parse_record(record)?;

    if session.store().calendar(event.calendar_id).is_none() {
        return Err(AgendaError::CalendarNotFound(event.calendar_id).into());
    }

    let id = event.id.clone();
    session.store_mut().add_event(event);
    session.save()?;

    if let Some(added) = session.store().event(&id) {
        println!("{} {}", "+".green(), added.render());
    }
    if !session.store().events().iter().any(|e| e.id == id) {
        println!("{}", "Its calendar isn't selected, so it won't show up in `agenda show`".dimmed());
    }
    Ok(())
}

pub fn update(session: &mut Session, record: &str) -> Result<()> {
    let patch: EventPatch = parse_record(record)?;

    if session.store().event(&patch.id).is_none() {
        bail!("Event not found: {}", patch.id);
    }

    session.store_mut().update_event(&patch);
    session.save()?;

    if let Some(updated) = session.store().event(&patch.id) {
        println!("{} {}", "~".yellow(), updated.render());
    }
    Ok(())
}

pub fn delete(session: &mut Session, id: &EventId) -> Result<()> {
    let Some(event) = session.store().event(id).cloned() else {
        bail!("Event not found: {}", id);
    };

    session.store_mut().delete_event(id);
    session.save()?;

    println!("{} {}", "-".red(), event.render());
    Ok(())
}
