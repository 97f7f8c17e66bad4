//! Event records as exchanged with the agenda server.
//!
//! Events are plain data: the server creates and validates them, the store
//! only mirrors them into local views. Wire names follow the server's JSON
//! (`titulo`, `calendario_id`, ...).

use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{CalendarId, EventId};
use crate::wire;

/// Key under which the owning calendar's template is attached to projected events.
pub const TEMPLATE_KEY: &str = "template";

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    #[serde(rename = "titulo", default)]
    pub title: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "ubicacion", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Opaque to the client: servers send labels or numeric levels
    #[serde(rename = "prioridad", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(
        rename = "fecha_inicio",
        default,
        with = "wire::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<DateTime<Utc>>,

    #[serde(
        rename = "fecha_fin",
        default,
        with = "wire::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<DateTime<Utc>>,

    /// Owning calendar
    #[serde(rename = "calendario_id")]
    pub calendar_id: CalendarId,

    /// Server fields this client doesn't interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(id: i64, calendar_id: i64, title: impl Into<String>) -> Self {
        Event {
            id: EventId::from(id),
            title: title.into(),
            description: None,
            location: None,
            priority: None,
            color: None,
            start: None,
            end: None,
            calendar_id: CalendarId(calendar_id),
            extra: Map::new(),
        }
    }

    /// Drop fields that only exist on projected copies.
    ///
    /// Events read back from the projection carry their calendar's template;
    /// it must never be stored on the event itself.
    pub(crate) fn strip_projection_fields(&mut self) {
        self.extra.remove(TEMPLATE_KEY);
    }
}

/// Partial event update, shallow-merged over the stored event.
///
/// Every field except `id` is optional. An absent field leaves the stored
/// value untouched; an explicit `null` clears it. `calendario_id` can't be
/// cleared, so a `null` there counts as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    pub id: EventId,

    #[serde(
        rename = "titulo",
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,

    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,

    #[serde(
        rename = "ubicacion",
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<String>>,

    #[serde(
        rename = "prioridad",
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Option<Value>>,

    #[serde(
        default,
        deserialize_with = "wire::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,

    #[serde(
        rename = "fecha_inicio",
        default,
        with = "wire::patch_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<Option<DateTime<Utc>>>,

    #[serde(
        rename = "fecha_fin",
        default,
        with = "wire::patch_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<Option<DateTime<Utc>>>,

    #[serde(rename = "calendario_id", default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<CalendarId>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventPatch {
    pub fn new(id: EventId) -> Self {
        EventPatch {
            id,
            title: None,
            description: None,
            location: None,
            priority: None,
            color: None,
            start: None,
            end: None,
            calendar_id: None,
            extra: Map::new(),
        }
    }

    /// Merge the present fields over `event`.
    ///
    /// `calendar_id` is not applied here: moving an event between calendars
    /// changes ownership, which the store handles.
    pub fn apply(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone().unwrap_or_default();
        }
        overwrite(&mut event.description, &self.description);
        overwrite(&mut event.location, &self.location);
        overwrite(&mut event.priority, &self.priority);
        overwrite(&mut event.color, &self.color);
        overwrite(&mut event.start, &self.start);
        overwrite(&mut event.end, &self.end);

        for (key, value) in &self.extra {
            if key == TEMPLATE_KEY {
                continue;
            }
            event.extra.insert(key.clone(), value.clone());
        }
    }
}

fn overwrite<T: Clone>(field: &mut Option<T>, incoming: &Option<Option<T>>) {
    if let Some(value) = incoming {
        *field = value.clone();
    }
}

impl From<Event> for EventPatch {
    fn from(event: Event) -> Self {
        EventPatch {
            id: event.id,
            title: Some(Some(event.title)),
            description: Some(event.description),
            location: Some(event.location),
            priority: Some(event.priority),
            color: Some(event.color),
            start: Some(event.start),
            end: Some(event.end),
            calendar_id: Some(event.calendar_id),
            extra: event.extra,
        }
    }
}

/// An event as rendered: the event's own fields plus its calendar's template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub template: Value,
}

impl Deref for ProjectedEvent {
    type Target = Event;

    fn deref(&self) -> &Event {
        &self.event
    }
}
