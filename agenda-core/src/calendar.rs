//! Calendar records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::Event;
use crate::id::CalendarId;

/// A calendar as returned by the server, optionally with its events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Visual configuration; opaque to this crate
    #[serde(default)]
    pub template: Value,

    /// `None` when the record was sent without an `eventos` key
    #[serde(rename = "eventos", default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Calendar {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Calendar {
            id: CalendarId(id),
            name: name.into(),
            description: None,
            template: Value::Null,
            events: None,
            extra: Map::new(),
        }
    }

    pub fn with_template(mut self, template: Value) -> Self {
        self.template = template;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
