//! Derived views over the normalized entities.

use crate::calendar::Calendar;
use crate::event::ProjectedEvent;
use crate::id::CalendarId;
use crate::selection::entities::Entities;

/// Every calendar in canonical order, each with its events.
pub(crate) fn canonical_calendars(entities: &Entities) -> Vec<Calendar> {
    resolve_calendars(entities, entities.order())
}

/// The calendars named by `ids`, in that order.
pub(crate) fn resolve_calendars(entities: &Entities, ids: &[CalendarId]) -> Vec<Calendar> {
    ids.iter().filter_map(|id| entities.materialize(*id)).collect()
}

/// The events of the selected calendars, concatenated in selection order,
/// each carrying its calendar's template.
pub(crate) fn project_events(entities: &Entities, selected: &[CalendarId]) -> Vec<ProjectedEvent> {
    selected
        .iter()
        .filter_map(|id| entities.entry(*id))
        .flat_map(|entry| {
            entry.event_ids.iter().filter_map(move |event_id| {
                entities.event(event_id).map(|event| ProjectedEvent {
                    event: event.clone(),
                    template: entry.calendar.template.clone(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::id::EventId;
    use serde_json::json;

    fn fixture() -> Entities {
        Entities::from_calendars(vec![
            Calendar::new(1, "uno")
                .with_template(json!({"color": "red"}))
                .with_events(vec![Event::new(10, 1, "a"), Event::new(11, 1, "b")]),
            Calendar::new(2, "dos")
                .with_template(json!({"color": "blue"}))
                .with_events(vec![Event::new(20, 2, "c")]),
            Calendar::new(3, "tres"),
        ])
    }

    #[test]
    fn test_projection_follows_selection_order() {
        let entities = fixture();
        let events = project_events(&entities, &[CalendarId(2), CalendarId(1)]);

        let ids: Vec<EventId> = events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(
            ids,
            vec![EventId::from(20_i64), EventId::from(10_i64), EventId::from(11_i64)]
        );
        assert_eq!(events[0].template, json!({"color": "blue"}));
        assert_eq!(events[1].template, json!({"color": "red"}));
    }

    #[test]
    fn test_projection_of_calendar_without_events_is_empty() {
        let entities = fixture();
        assert!(project_events(&entities, &[CalendarId(3)]).is_empty());
        assert!(project_events(&entities, &[]).is_empty());
    }

    #[test]
    fn test_canonical_calendars_carry_event_lists() {
        let entities = fixture();
        let calendars = canonical_calendars(&entities);

        assert_eq!(calendars.len(), 3);
        assert_eq!(calendars[0].events().len(), 2);
        assert_eq!(calendars[2].events, Some(vec![]));
    }
}
