//! Terminal rendering for agenda-core types.

use agenda_core::{Calendar, Event, ProjectedEvent};
use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Calendar {
    fn render(&self) -> String {
        let count = self.events().len();
        let label = format!("({} {})", count, pluralize("event", count));
        format!("📅 {} {} {}", self.name.bold(), format!("#{}", self.id).dimmed(), label.dimmed())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!("{} {}", format_time(self.start, self.end), self.title);
        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        line
    }
}

impl Render for ProjectedEvent {
    fn render(&self) -> String {
        let tag = format!("[{}]", self.calendar_id);
        format!("{} {}", self.event.render(), tag.dimmed())
    }
}

/// Format an event's time span (e.g. "Thu Mar 20 15:00-16:00")
fn format_time(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> String {
    let Some(start) = start.map(|s| s.with_timezone(&Local)) else {
        return format!("{:>18}", "unscheduled");
    };

    let end = end.map(|e| e.with_timezone(&Local));
    match end {
        Some(end) if end.date_naive() == start.date_naive() => {
            format!("{}-{}", start.format("%a %b %e %H:%M"), end.format("%H:%M"))
        }
        _ => format!("{:>18}", start.format("%a %b %e %H:%M").to_string()),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscheduled_event_renders_title() {
        let event = Event::new(1, 2, "Llamar al banco");
        let rendered = event.render();
        assert!(rendered.contains("unscheduled"));
        assert!(rendered.contains("Llamar al banco"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
    }
}
