//! Normalized calendar and event storage backing the selection store.

use std::collections::{HashMap, HashSet};

use crate::calendar::Calendar;
use crate::event::{Event, EventPatch};
use crate::id::{CalendarId, EventId};

/// A calendar's own fields plus the ordered ids of the events it owns.
#[derive(Debug, Clone)]
pub(crate) struct CalendarEntry {
    /// Always stored with `events: None`; events live in `Entities::events`
    pub calendar: Calendar,
    pub event_ids: Vec<EventId>,
}

/// Every calendar and event exactly once.
///
/// Event ids are unique across calendars. An event's `calendar_id` always
/// names the calendar whose `event_ids` lists it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Entities {
    /// Canonical order, newest first
    order: Vec<CalendarId>,
    calendars: HashMap<CalendarId, CalendarEntry>,
    events: HashMap<EventId, Event>,
}

impl Entities {
    pub fn from_calendars(calendars: Vec<Calendar>) -> Self {
        let mut entities = Entities::default();
        for calendar in calendars {
            if entities.contains(calendar.id) {
                tracing::debug!(calendar = %calendar.id, "duplicate calendar in input, merging");
                entities.update_calendar(calendar);
            } else {
                entities.insert(entities.order.len(), calendar);
            }
        }
        entities
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: CalendarId) -> bool {
        self.calendars.contains_key(&id)
    }

    pub fn first(&self) -> Option<CalendarId> {
        self.order.first().copied()
    }

    pub fn order(&self) -> &[CalendarId] {
        &self.order
    }

    pub fn entry(&self, id: CalendarId) -> Option<&CalendarEntry> {
        self.calendars.get(&id)
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    /// Keep ids that name a known calendar, first occurrence wins.
    pub fn retain_known(&self, ids: &[CalendarId]) -> Vec<CalendarId> {
        let mut seen = HashSet::new();
        ids.iter()
            .copied()
            .filter(|id| self.contains(*id) && seen.insert(*id))
            .collect()
    }

    /// Put a calendar at the front of the canonical order.
    ///
    /// A calendar that already exists moves to the front and takes the
    /// incoming fields.
    pub fn insert_front(&mut self, calendar: Calendar) {
        let id = calendar.id;
        if self.contains(id) {
            self.order.retain(|c| *c != id);
            self.order.insert(0, id);
            self.update_calendar(calendar);
        } else {
            self.insert(0, calendar);
        }
    }

    fn insert(&mut self, position: usize, mut calendar: Calendar) {
        let id = calendar.id;
        let events = calendar.events.take().unwrap_or_default();

        self.order.insert(position, id);
        self.calendars.insert(
            id,
            CalendarEntry {
                calendar,
                event_ids: Vec::new(),
            },
        );

        for event in events {
            self.attach_event(id, event);
        }
    }

    /// Replace a calendar's fields. Its events are replaced only when the
    /// incoming record carries an event list.
    ///
    /// Returns false when the calendar is unknown.
    pub fn update_calendar(&mut self, mut calendar: Calendar) -> bool {
        let id = calendar.id;
        let events = calendar.events.take();

        let Some(entry) = self.calendars.get_mut(&id) else {
            return false;
        };
        entry.calendar = calendar;

        if let Some(events) = events {
            let previous = std::mem::take(&mut entry.event_ids);
            for event_id in previous {
                self.events.remove(&event_id);
            }
            for event in events {
                self.attach_event(id, event);
            }
        }

        true
    }

    /// Store an event under `owner`.
    ///
    /// An event id already present is replaced; it keeps its position when
    /// the owner is unchanged and moves to the end of the new owner's list
    /// otherwise.
    pub fn attach_event(&mut self, owner: CalendarId, mut event: Event) {
        let Some(entry) = self.calendars.get_mut(&owner) else {
            return;
        };

        event.strip_projection_fields();
        if event.calendar_id != owner {
            tracing::debug!(
                event = %event.id,
                claimed = %event.calendar_id,
                owner = %owner,
                "event listed under another calendar, using the listing calendar"
            );
            event.calendar_id = owner;
        }

        let previous_owner = self.events.get(&event.id).map(|e| e.calendar_id);
        match previous_owner {
            Some(previous) if previous == owner => {}
            Some(previous) => {
                entry.event_ids.push(event.id.clone());
                if let Some(old) = self.calendars.get_mut(&previous) {
                    old.event_ids.retain(|id| *id != event.id);
                }
            }
            None => entry.event_ids.push(event.id.clone()),
        }

        self.events.insert(event.id.clone(), event);
    }

    /// Shallow-merge a patch into the stored event.
    ///
    /// Returns false when no event has the patch's id.
    pub fn update_event(&mut self, patch: &EventPatch) -> bool {
        let Some(event) = self.events.get_mut(&patch.id) else {
            return false;
        };
        patch.apply(event);

        if let Some(target) = patch.calendar_id {
            let current = event.calendar_id;
            if target != current {
                if self.calendars.contains_key(&target) {
                    event.calendar_id = target;
                    if let Some(old) = self.calendars.get_mut(&current) {
                        old.event_ids.retain(|id| *id != patch.id);
                    }
                    if let Some(new) = self.calendars.get_mut(&target) {
                        new.event_ids.push(patch.id.clone());
                    }
                } else {
                    tracing::warn!(
                        event = %patch.id,
                        calendar = %target,
                        "cannot move event to unknown calendar, keeping current owner"
                    );
                }
            }
        }

        true
    }

    /// Returns false when no event has this id.
    pub fn remove_event(&mut self, id: &EventId) -> bool {
        let Some(event) = self.events.remove(id) else {
            return false;
        };
        if let Some(entry) = self.calendars.get_mut(&event.calendar_id) {
            entry.event_ids.retain(|e| e != id);
        }
        true
    }

    /// The calendar with its events attached, as the host sees it.
    pub fn materialize(&self, id: CalendarId) -> Option<Calendar> {
        let entry = self.calendars.get(&id)?;
        let events = entry
            .event_ids
            .iter()
            .filter_map(|event_id| self.events.get(event_id))
            .cloned()
            .collect();

        Some(entry.calendar.clone().with_events(events))
    }
}
