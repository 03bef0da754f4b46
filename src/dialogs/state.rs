//! Strongly-typed widget view state, addressed by widget id inside a
//! store owned by the enclosing dialog context. Widgets mutate their
//! record only from click handlers; rendering reads it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which level of the calendar is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarScope {
    #[default]
    Days,
    Months,
    Years,
}

/// The checked-selection value. Its shape depends on the widget
/// variant: radio and marked calendars use `Single`, the multiselect
/// calendar uses `Many` (insertion-ordered, duplicate-free).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Single(NaiveDate),
    Many(Vec<NaiveDate>),
}

/// Persisted view state of one calendar widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub scope: CalendarScope,
    /// First day of the displayed month.
    pub offset: NaiveDate,
    pub selection: Selection,
}

impl CalendarState {
    pub fn new(offset: NaiveDate) -> Self {
        Self {
            scope: CalendarScope::Days,
            offset: first_of_month(offset),
            selection: Selection::None,
        }
    }
}

pub(crate) fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Host-stored position of a pager widget. The pager itself is a pure
/// function of this plus the page count supplied per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagerPosition {
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetState {
    Calendar(CalendarState),
    Pager(PagerPosition),
}

/// Per-dialog widget state records, keyed by widget id. Never shared
/// across conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetStateStore {
    entries: HashMap<String, WidgetState>,
}

impl WidgetStateStore {
    pub fn get(&self, id: &str) -> Option<&WidgetState> {
        self.entries.get(id)
    }

    pub fn set(&mut self, id: &str, state: WidgetState) {
        self.entries.insert(id.to_string(), state);
    }

    pub fn remove(&mut self, id: &str) {
        self.entries.remove(id);
    }

    pub fn calendar(&self, id: &str) -> Option<&CalendarState> {
        match self.entries.get(id) {
            Some(WidgetState::Calendar(state)) => Some(state),
            _ => None,
        }
    }

    /// Fetches the calendar record for `id`, creating a fresh one
    /// showing the month of `offset` on first access.
    pub fn calendar_or_insert(&mut self, id: &str, offset: NaiveDate) -> &mut CalendarState {
        let entry = self
            .entries
            .entry(id.to_string())
            .or_insert_with(|| WidgetState::Calendar(CalendarState::new(offset)));
        if !matches!(entry, WidgetState::Calendar(_)) {
            // A record of another kind under this id is stale; replace it.
            *entry = WidgetState::Calendar(CalendarState::new(offset));
        }
        match entry {
            WidgetState::Calendar(state) => state,
            _ => unreachable!(),
        }
    }

    pub fn pager_page(&self, id: &str) -> usize {
        match self.entries.get(id) {
            Some(WidgetState::Pager(position)) => position.page,
            _ => 0,
        }
    }

    pub fn set_pager_page(&mut self, id: &str, page: usize) {
        self.entries
            .insert(id.to_string(), WidgetState::Pager(PagerPosition { page }));
    }
}
