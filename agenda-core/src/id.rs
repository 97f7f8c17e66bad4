//! Identifiers for calendars and events.
//!
//! Ids arrive from the server as JSON numbers, but forms and URL parameters
//! hand them back as strings. Both representations are accepted here and
//! canonicalized once, so every comparison in the store is plain equality.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Any JSON shape an id can take on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

/// The integer an integral float stands for, if it fits in an `i64`.
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Server-assigned calendar identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CalendarId(pub i64);

impl From<i64> for CalendarId {
    fn from(id: i64) -> Self {
        CalendarId(id)
    }
}

impl FromStr for CalendarId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(CalendarId)
            .map_err(|_| format!("Invalid calendar id '{}'. Expected an integer", s))
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CalendarId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Ok(CalendarId(n)),
            RawId::Float(f) => integral(f).map(CalendarId).ok_or_else(|| {
                de::Error::custom(format!("calendar id must be a 64-bit integer, got {}", f))
            }),
            RawId::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Event identity in canonical string form.
///
/// Numeric ids are stored as their decimal rendering, so `5`, `"5"`,
/// `" 5 "` and `"005"` are all the same event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => EventId(n.to_string()),
            Err(_) => EventId(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value, when the id is numeric.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        EventId(id.to_string())
    }
}

impl From<&str> for EventId {
    fn from(raw: &str) -> Self {
        EventId::new(raw)
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EventId::new(s))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Ok(EventId::from(n)),
            RawId::Float(f) => Ok(match integral(f) {
                Some(n) => EventId::from(n),
                None => EventId(f.to_string()),
            }),
            RawId::Text(s) => Ok(EventId::new(&s)),
        }
    }
}
