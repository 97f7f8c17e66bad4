//! Calendar selection state.
//!
//! `SelectionStore` owns the canonical calendar set, which of those
//! calendars are selected, and the flattened event list the UI renders.
//! Calendars and events are held once, normalized; the views handed to the
//! host are rebuilt after every change so they can never disagree with each
//! other.
//!
//! The selected ids are persisted through a [`KeyValueStore`] on every
//! explicit selection change and read back on hydration.

mod entities;
mod hydrate;
mod projection;

pub use hydrate::Hydration;

use crate::calendar::Calendar;
use crate::event::{Event, EventPatch, ProjectedEvent};
use crate::id::{CalendarId, EventId};
use crate::storage::{KeyValueStore, SelectionSlot};
use entities::Entities;

/// Default storage key for the selected calendar ids.
pub const DEFAULT_SELECTION_KEY: &str = "selected_calendar_ids";

#[derive(Debug, Clone, Default)]
struct Views {
    calendars: Vec<Calendar>,
    selected: Vec<Calendar>,
    events: Vec<ProjectedEvent>,
}

pub struct SelectionStore<S: KeyValueStore> {
    storage: S,
    key: String,
    entities: Entities,
    selected: Vec<CalendarId>,
    views: Views,
}

impl<S: KeyValueStore> SelectionStore<S> {
    /// Create a store and hydrate it from `hydration`.
    pub fn new(storage: S, key: impl Into<String>, hydration: Hydration) -> Self {
        let mut store = SelectionStore {
            storage,
            key: key.into(),
            entities: Entities::default(),
            selected: Vec::new(),
            views: Views::default(),
        };
        store.hydrate(hydration);
        store
    }

    /// Replace all state from host input.
    ///
    /// Safe to call whenever the input changes; the same input and the same
    /// persisted slot always produce the same state. Hydration reads the
    /// slot but never writes it.
    pub fn hydrate(&mut self, hydration: Hydration) {
        let Hydration {
            calendars,
            selected,
            default_calendar,
        } = hydration;

        self.entities = Entities::from_calendars(calendars);

        let explicit: Vec<CalendarId> = selected.iter().map(|c| c.id).collect();
        let slot = SelectionSlot::new(&mut self.storage, &self.key);
        self.selected = hydrate::resolve_selection(
            &self.entities,
            &explicit,
            default_calendar,
            || slot.read(),
        );

        tracing::debug!(
            calendars = self.entities.order().len(),
            selected = ?self.selected,
            "hydrated selection"
        );
        self.refresh();
    }

    /// Make `calendars` the selection, in the given order, and remember it.
    ///
    /// Calendars unknown to the store are skipped.
    pub fn select(&mut self, calendars: &[Calendar]) {
        let requested: Vec<CalendarId> = calendars.iter().map(|c| c.id).collect();
        let known = self.entities.retain_known(&requested);
        if known.len() != requested.len() {
            tracing::debug!(?requested, ?known, "skipped unknown or repeated calendars");
        }

        self.selected = known;
        SelectionSlot::new(&mut self.storage, &self.key).write(&self.selected);
        self.refresh();
    }

    pub fn select_by_ids(&mut self, ids: &[CalendarId]) {
        let known = self.entities.retain_known(ids);
        let calendars = projection::resolve_calendars(&self.entities, &known);
        self.select(&calendars);
    }

    /// Add a newly created calendar at the front and make it the only
    /// selected calendar.
    pub fn add_calendar(&mut self, calendar: Calendar) {
        let id = calendar.id;
        self.entities.insert_front(calendar);

        let added = projection::resolve_calendars(&self.entities, &[id]);
        self.select(&added);
    }

    /// Apply a confirmed calendar update.
    ///
    /// Events of the calendar pick up the new template immediately. The event
    /// list itself is only replaced when the record carries `eventos`.
    pub fn update_calendar(&mut self, calendar: Calendar) {
        let id = calendar.id;
        if !self.entities.update_calendar(calendar) {
            tracing::debug!(calendar = %id, "update for unknown calendar ignored");
            return;
        }
        self.refresh();
    }

    /// Add a confirmed event to its calendar.
    ///
    /// The event only shows up in [`events`](Self::events) if its calendar is
    /// selected.
    pub fn add_event(&mut self, event: Event) {
        let owner = event.calendar_id;
        if !self.entities.contains(owner) {
            tracing::warn!(event = %event.id, calendar = %owner, "event for unknown calendar dropped");
            return;
        }
        self.entities.attach_event(owner, event);
        self.refresh();
    }

    /// Shallow-merge an event update into the stored event.
    pub fn update_event(&mut self, patch: &EventPatch) {
        if !self.entities.update_event(patch) {
            tracing::debug!(event = %patch.id, "update for unknown event ignored");
            return;
        }
        self.refresh();
    }

    pub fn delete_event(&mut self, id: &EventId) {
        if !self.entities.remove_event(id) {
            tracing::debug!(event = %id, "delete for unknown event ignored");
            return;
        }
        self.refresh();
    }

    // VIEWS:

    /// The canonical calendar set, newest first.
    pub fn calendars(&self) -> &[Calendar] {
        &self.views.calendars
    }

    pub fn calendar(&self, id: CalendarId) -> Option<&Calendar> {
        self.views.calendars.iter().find(|c| c.id == id)
    }

    /// Look up any stored event, selected or not.
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.entities.event(id)
    }

    pub fn selected_calendars(&self) -> &[Calendar] {
        &self.views.selected
    }

    pub fn selected_ids(&self) -> &[CalendarId] {
        &self.selected
    }

    pub fn is_selected(&self, id: CalendarId) -> bool {
        self.selected.contains(&id)
    }

    /// Events of the selected calendars, in selection order.
    pub fn events(&self) -> &[ProjectedEvent] {
        &self.views.events
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn refresh(&mut self) {
        self.views = Views {
            calendars: projection::canonical_calendars(&self.entities),
            selected: projection::resolve_calendars(&self.entities, &self.selected),
            events: projection::project_events(&self.entities, &self.selected),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn calendars() -> Vec<Calendar> {
        vec![
            Calendar::new(1, "Trabajo")
                .with_template(json!({"color": "red"}))
                .with_events(vec![Event::new(5, 1, "Standup"), Event::new(9, 1, "Retro")]),
            Calendar::new(2, "Casa").with_template(json!({"color": "green"})),
        ]
    }

    fn store() -> SelectionStore<MemoryStorage> {
        SelectionStore::new(
            MemoryStorage::new(),
            DEFAULT_SELECTION_KEY,
            Hydration::new(calendars()),
        )
    }

    fn projected_ids(store: &SelectionStore<MemoryStorage>) -> Vec<EventId> {
        store.events().iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_hydrate_without_history_selects_first_calendar() {
        let store = store();
        assert_eq!(store.selected_ids(), &[CalendarId(1)]);
        assert_eq!(store.selected_calendars().len(), 1);
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn test_hydrate_does_not_write_storage() {
        let store = store();
        assert_eq!(store.storage().get(DEFAULT_SELECTION_KEY).unwrap(), None);
    }

    #[test]
    fn test_select_persists_ids() {
        let mut store = store();
        store.select_by_ids(&[CalendarId(2), CalendarId(1)]);

        assert_eq!(store.selected_ids(), &[CalendarId(2), CalendarId(1)]);
        assert_eq!(
            store.storage().get(DEFAULT_SELECTION_KEY).unwrap().as_deref(),
            Some("[2,1]")
        );
    }

    #[test]
    fn test_select_empty_clears_projection() {
        let mut store = store();
        store.select(&[]);

        assert!(store.selected_ids().is_empty());
        assert!(store.events().is_empty());
        assert_eq!(
            store.storage().get(DEFAULT_SELECTION_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_update_calendar_refreshes_template_of_projected_events() {
        let mut store = store();
        store.update_calendar(Calendar::new(1, "Trabajo").with_template(json!({"color": "black"})));

        assert!(store.events().iter().all(|e| e.template == json!({"color": "black"})));
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.selected_calendars()[0].template, json!({"color": "black"}));
    }

    #[test]
    fn test_update_unknown_calendar_is_noop() {
        let mut store = store();
        let before = store.calendars().to_vec();
        store.update_calendar(Calendar::new(99, "ghost"));
        assert_eq!(store.calendars(), before.as_slice());
    }

    #[test]
    fn test_add_event_to_selected_calendar_appends_to_projection() {
        let mut store = store();
        store.add_event(Event::new(12, 1, "Planning"));

        assert_eq!(
            projected_ids(&store),
            vec![EventId::from(5_i64), EventId::from(9_i64), EventId::from(12_i64)]
        );
        assert_eq!(store.events()[2].template, json!({"color": "red"}));
        assert_eq!(store.selected_calendars()[0].events().len(), 3);
    }

    #[test]
    fn test_add_event_to_unknown_calendar_is_dropped() {
        let mut store = store();
        store.add_event(Event::new(12, 42, "Nowhere"));

        assert_eq!(store.events().len(), 2);
        assert!(store.calendars().iter().all(|c| c.events().len() <= 2));
    }

    #[test]
    fn test_update_event_reaches_every_view() {
        let mut store = store();
        let mut patch = EventPatch::new(EventId::new("9"));
        patch.location = Some(Some("Sala 3".to_string()));
        store.update_event(&patch);

        let projected = store.events().iter().find(|e| e.id == patch.id).unwrap();
        assert_eq!(projected.location.as_deref(), Some("Sala 3"));
        assert_eq!(projected.title, "Retro");

        let canonical = &store.calendar(CalendarId(1)).unwrap().events()[1];
        assert_eq!(canonical.location.as_deref(), Some("Sala 3"));
        assert_eq!(
            store.selected_calendars()[0].events()[1].location.as_deref(),
            Some("Sala 3")
        );
    }

    #[test]
    fn test_update_event_moving_to_unselected_calendar_leaves_projection() {
        let mut store = store();
        let mut patch = EventPatch::new(EventId::from(5_i64));
        patch.calendar_id = Some(CalendarId(2));
        store.update_event(&patch);

        assert_eq!(projected_ids(&store), vec![EventId::from(9_i64)]);
        assert_eq!(store.calendar(CalendarId(2)).unwrap().events().len(), 1);
    }

    #[test]
    fn test_delete_unknown_event_is_noop() {
        let mut store = store();
        store.delete_event(&EventId::from(1234_i64));
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn test_rehydrate_with_new_calendars_revalidates_selection() {
        let mut store = store();
        store.select_by_ids(&[CalendarId(2)]);

        store.hydrate(Hydration::new(vec![Calendar::new(3, "Nuevo")]));
        assert_eq!(store.selected_ids(), &[CalendarId(3)]);
    }
}
