use agenda_core::CalendarId;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session::Session;

pub fn run(session: &mut Session, ids: &[CalendarId]) -> Result<()> {
    for id in ids {
        if session.store().calendar(*id).is_none() {
            println!("{}", format!("Skipping unknown calendar {}", id).yellow());
        }
    }

    let store = session.store_mut();
    store.select_by_ids(ids);

    if store.selected_calendars().is_empty() {
        println!("{}", "No calendars selected".dimmed());
    }
    for calendar in store.selected_calendars() {
        println!("{} {}", "✓".green(), calendar.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::Calendar;
    use agenda_core::selection::DEFAULT_SELECTION_KEY;

    #[test]
    fn test_selection_is_remembered_without_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::open_at(dir.path(), DEFAULT_SELECTION_KEY, None).unwrap();
        session.store_mut().add_calendar(Calendar::new(1, "Trabajo"));
        session.store_mut().add_calendar(Calendar::new(2, "Casa"));
        session.save().unwrap();

        run(&mut session, &[CalendarId(1), CalendarId(99), CalendarId(2)]).unwrap();
        assert_eq!(session.store().selected_ids(), &[CalendarId(1), CalendarId(2)]);

        let reopened = Session::open_at(dir.path(), DEFAULT_SELECTION_KEY, None).unwrap();
        assert_eq!(reopened.store().selected_ids(), &[CalendarId(1), CalendarId(2)]);
    }

    #[test]
    fn test_selecting_only_unknown_ids_clears_selection() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::open_at(dir.path(), DEFAULT_SELECTION_KEY, None).unwrap();
        session.store_mut().add_calendar(Calendar::new(1, "Trabajo"));

        run(&mut session, &[CalendarId(42)]).unwrap();
        assert!(session.store().selected_ids().is_empty());
        assert!(session.store().events().is_empty());
    }
}
