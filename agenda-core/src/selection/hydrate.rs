//! Choosing the initial selection from host input and the persisted slot.

use crate::calendar::Calendar;
use crate::id::CalendarId;
use crate::selection::entities::Entities;

/// What the hosting page hands the store on load.
#[derive(Debug, Clone, Default)]
pub struct Hydration {
    /// Canonical calendar set, in display order
    pub calendars: Vec<Calendar>,
    /// Explicit pre-selection; wins over everything else when non-empty
    pub selected: Vec<Calendar>,
    /// Used when neither an explicit nor a remembered selection applies
    pub default_calendar: Option<CalendarId>,
}

impl Hydration {
    pub fn new(calendars: Vec<Calendar>) -> Self {
        Hydration {
            calendars,
            ..Default::default()
        }
    }

    pub fn with_selected(mut self, selected: Vec<Calendar>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_default(mut self, default_calendar: Option<CalendarId>) -> Self {
        self.default_calendar = default_calendar;
        self
    }
}

/// Pick the selection, in order of precedence: explicit ids, remembered
/// ids, the default calendar, the first canonical calendar.
///
/// Unknown ids are dropped at every step. `remembered` is only consulted
/// when the explicit selection is empty.
pub(crate) fn resolve_selection(
    entities: &Entities,
    explicit: &[CalendarId],
    default_calendar: Option<CalendarId>,
    remembered: impl FnOnce() -> Vec<CalendarId>,
) -> Vec<CalendarId> {
    if entities.is_empty() {
        return vec![];
    }

    let explicit = entities.retain_known(explicit);
    if !explicit.is_empty() {
        tracing::debug!(?explicit, "using explicit selection");
        return explicit;
    }

    let remembered = entities.retain_known(&remembered());
    if !remembered.is_empty() {
        tracing::debug!(?remembered, "using persisted selection");
        return remembered;
    }

    let fallback = default_calendar
        .filter(|id| entities.contains(*id))
        .or_else(|| entities.first());
    tracing::debug!(?fallback, "falling back to a single calendar");

    fallback.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(ids: &[i64]) -> Entities {
        Entities::from_calendars(ids.iter().map(|id| Calendar::new(*id, "c")).collect())
    }

    #[test]
    fn test_explicit_wins() {
        let resolved = resolve_selection(
            &entities(&[1, 2, 3]),
            &[CalendarId(1)],
            Some(CalendarId(3)),
            || vec![CalendarId(2)],
        );
        assert_eq!(resolved, vec![CalendarId(1)]);
    }

    #[test]
    fn test_remembered_is_not_read_when_explicit_applies() {
        let resolved = resolve_selection(&entities(&[1, 2]), &[CalendarId(2)], None, || {
            panic!("persisted selection should not be read")
        });
        assert_eq!(resolved, vec![CalendarId(2)]);
    }

    #[test]
    fn test_remembered_filters_stale_ids() {
        let resolved = resolve_selection(&entities(&[1, 2, 3]), &[], None, || {
            vec![CalendarId(9), CalendarId(3), CalendarId(1)]
        });
        assert_eq!(resolved, vec![CalendarId(3), CalendarId(1)]);
    }

    #[test]
    fn test_unknown_explicit_falls_through_to_remembered() {
        let resolved = resolve_selection(&entities(&[1, 2]), &[CalendarId(8)], None, || {
            vec![CalendarId(2)]
        });
        assert_eq!(resolved, vec![CalendarId(2)]);
    }

    #[test]
    fn test_default_then_first() {
        let all = entities(&[4, 5, 6]);

        let with_default = resolve_selection(&all, &[], Some(CalendarId(6)), || vec![CalendarId(99)]);
        assert_eq!(with_default, vec![CalendarId(6)]);

        let stale_default = resolve_selection(&all, &[], Some(CalendarId(42)), Vec::new);
        assert_eq!(stale_default, vec![CalendarId(4)]);
    }

    #[test]
    fn test_empty_canonical_set_selects_nothing() {
        let resolved = resolve_selection(&entities(&[]), &[CalendarId(1)], Some(CalendarId(1)), || {
            vec![CalendarId(1)]
        });
        assert!(resolved.is_empty());
    }
}
