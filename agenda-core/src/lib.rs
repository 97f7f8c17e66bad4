//! Core types for agenda.
//!
//! This crate provides the pieces shared by every agenda host:
//! - `Calendar` and `Event` records as the server sends them
//! - `SelectionStore`, which keeps the canonical calendars, the selected
//!   subset and the rendered event list consistent as changes arrive
//! - storage adapters for the remembered selection, and configuration

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod selection;
pub mod storage;
pub mod wire;

pub use calendar::Calendar;
pub use error::{AgendaError, AgendaResult};
pub use event::{Event, EventPatch, ProjectedEvent};
pub use id::{CalendarId, EventId};
pub use selection::{Hydration, SelectionStore};
