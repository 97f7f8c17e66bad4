//! Error types for the agenda ecosystem.

use thiserror::Error;

use crate::id::CalendarId;

/// Errors that can occur in agenda operations.
///
/// The selection store itself never returns these; they come from the
/// configuration layer and the storage adapters.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(CalendarId),

    #[error("Invalid storage key '{0}': only ASCII letters, digits, '-', '_' and '.' are allowed")]
    InvalidStorageKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
