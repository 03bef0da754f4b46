//! Calendar widgets: a month/year-navigable date grid in three
//! selection flavors. Rendering is a pure function of widget state and
//! the item set supplied by the host; clicks are the only mutation
//! path.

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::dialogs::state::{
    first_of_month, CalendarScope, CalendarState, Selection, WidgetStateStore,
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

const YEARS_PER_PAGE: i32 = 12;

/// Glyph for a day cell whose rendering depends on two independent
/// booleans: is the date selected, and is it a valid/markable item.
pub fn day_glyph(day: NaiveDate, checked: bool, in_items: bool) -> String {
    match (checked, in_items) {
        (true, true) => format!("[{:02}]", day.day()),
        (true, false) => "[✗]".to_string(),
        (false, true) => format!("{:02}", day.day()),
        (false, false) => "✗".to_string(),
    }
}

/// Glyph for calendars that only mark item membership.
pub fn marked_glyph(day: NaiveDate, in_items: bool) -> String {
    if in_items {
        format!("{:02}", day.day())
    } else {
        "✗".to_string()
    }
}

/// A decoded click on a calendar keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    Day(NaiveDate),
    PrevPage,
    NextPage,
    /// Drill up one scope: days -> months -> years.
    ZoomOut,
    Month { year: i32, month: u32 },
    Year(i32),
}

fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Shifts a first-of-month date by whole months.
fn shift_months(month_start: NaiveDate, delta: i32) -> NaiveDate {
    let index = month_start.year() * 12 + month_start.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}

fn days_in_month(month_start: NaiveDate) -> u32 {
    shift_months(month_start, 1)
        .pred_opt()
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Weeks of the displayed month, Monday-first, padded with `None`.
fn month_grid(offset: NaiveDate) -> Vec<Vec<Option<NaiveDate>>> {
    let first = first_of_month(offset);
    let lead = first.weekday().num_days_from_monday() as usize;
    let total = days_in_month(first);

    let mut weeks = Vec::new();
    let mut week: Vec<Option<NaiveDate>> = vec![None; lead];
    for day in 1..=total {
        week.push(first.with_day(day));
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        week.resize(7, None);
        weeks.push(week);
    }
    weeks
}

/// Shared identity, state access, navigation and grid rendering for
/// all calendar variants.
#[derive(Debug, Clone)]
struct CalendarCore {
    id: String,
}

impl CalendarCore {
    fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    fn data(&self, suffix: &str) -> String {
        format!("cal:{}:{}", self.id, suffix)
    }

    fn view_state(&self, store: &WidgetStateStore, today: NaiveDate) -> CalendarState {
        store
            .calendar(&self.id)
            .cloned()
            .unwrap_or_else(|| CalendarState::new(today))
    }

    /// Applies a navigation event to the widget record. Returns false
    /// for day clicks, which each variant handles itself.
    fn apply_navigation(
        &self,
        store: &mut WidgetStateStore,
        today: NaiveDate,
        event: CalendarEvent,
    ) -> bool {
        let state = store.calendar_or_insert(&self.id, today);
        match event {
            CalendarEvent::Day(_) => return false,
            CalendarEvent::PrevPage | CalendarEvent::NextPage => {
                let sign = if matches!(event, CalendarEvent::PrevPage) { -1 } else { 1 };
                let months = match state.scope {
                    CalendarScope::Days => 1,
                    CalendarScope::Months => 12,
                    CalendarScope::Years => 12 * YEARS_PER_PAGE,
                };
                state.offset = shift_months(state.offset, sign * months);
            }
            CalendarEvent::ZoomOut => {
                state.scope = match state.scope {
                    CalendarScope::Days => CalendarScope::Months,
                    CalendarScope::Months | CalendarScope::Years => CalendarScope::Years,
                };
            }
            CalendarEvent::Month { year, month } => {
                state.offset = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(state.offset);
                state.scope = CalendarScope::Days;
            }
            CalendarEvent::Year(year) => {
                state.offset =
                    NaiveDate::from_ymd_opt(year, state.offset.month(), 1).unwrap_or(state.offset);
                state.scope = CalendarScope::Months;
            }
        }
        true
    }

    fn render(
        &self,
        state: &CalendarState,
        today: NaiveDate,
        day_text: &dyn Fn(NaiveDate) -> String,
    ) -> InlineKeyboardMarkup {
        match state.scope {
            CalendarScope::Days => self.render_days(state.offset, day_text),
            CalendarScope::Months => self.render_months(state.offset, today),
            CalendarScope::Years => self.render_years(state.offset, today),
        }
    }

    fn render_days(
        &self,
        offset: NaiveDate,
        day_text: &dyn Fn(NaiveDate) -> String,
    ) -> InlineKeyboardMarkup {
        let offset = first_of_month(offset);
        let mut rows = Vec::new();

        rows.push(vec![InlineKeyboardButton::callback(
            format!("{} {}", month_name(offset), offset.year()),
            self.data("zoom"),
        )]);
        rows.push(
            WEEKDAY_NAMES
                .iter()
                .map(|name| InlineKeyboardButton::callback((*name).to_string(), self.data("noop")))
                .collect(),
        );
        for week in month_grid(offset) {
            rows.push(
                week.into_iter()
                    .map(|cell| match cell {
                        Some(day) => InlineKeyboardButton::callback(
                            day_text(day),
                            self.data(&format!("day:{}", day.format("%Y-%m-%d"))),
                        ),
                        None => InlineKeyboardButton::callback(" ".to_string(), self.data("noop")),
                    })
                    .collect(),
            );
        }
        rows.push(vec![
            InlineKeyboardButton::callback(
                format!("⊲ {}", month_name(shift_months(offset, -1))),
                self.data("nav:prev"),
            ),
            InlineKeyboardButton::callback(
                format!("{} ⊳", month_name(shift_months(offset, 1))),
                self.data("nav:next"),
            ),
        ]);
        InlineKeyboardMarkup::new(rows)
    }

    fn render_months(&self, offset: NaiveDate, today: NaiveDate) -> InlineKeyboardMarkup {
        let mut rows = Vec::new();
        rows.push(vec![InlineKeyboardButton::callback(
            format!("~~~~~ {} ~~~~~", offset.year()),
            self.data("zoom"),
        )]);
        for quarter in 0..3u32 {
            rows.push(
                (0..4u32)
                    .map(|i| {
                        let month = quarter * 4 + i + 1;
                        let name = MONTH_NAMES[month as usize - 1];
                        let label = if offset.year() == today.year() && month == today.month() {
                            format!("[{}]", name)
                        } else {
                            name.to_string()
                        };
                        InlineKeyboardButton::callback(
                            label,
                            self.data(&format!("month:{}-{}", offset.year(), month)),
                        )
                    })
                    .collect(),
            );
        }
        rows.push(vec![
            InlineKeyboardButton::callback("⊲".to_string(), self.data("nav:prev")),
            InlineKeyboardButton::callback("⊳".to_string(), self.data("nav:next")),
        ]);
        InlineKeyboardMarkup::new(rows)
    }

    fn render_years(&self, offset: NaiveDate, today: NaiveDate) -> InlineKeyboardMarkup {
        let start = offset.year() - offset.year().rem_euclid(YEARS_PER_PAGE);
        let mut rows = Vec::new();
        rows.push(vec![InlineKeyboardButton::callback(
            format!("{} — {}", start, start + YEARS_PER_PAGE - 1),
            self.data("noop"),
        )]);
        for row in 0..3 {
            rows.push(
                (0..4)
                    .map(|i| {
                        let year = start + row * 4 + i;
                        let label = if year == today.year() {
                            format!("[{}]", year)
                        } else {
                            year.to_string()
                        };
                        InlineKeyboardButton::callback(label, self.data(&format!("year:{}", year)))
                    })
                    .collect(),
            );
        }
        rows.push(vec![
            InlineKeyboardButton::callback("⊲".to_string(), self.data("nav:prev")),
            InlineKeyboardButton::callback("⊳".to_string(), self.data("nav:next")),
        ]);
        InlineKeyboardMarkup::new(rows)
    }
}

/// Decodes a `cal:{id}:…` payload addressed to the widget with `id`.
/// Unparsable or no-op payloads yield `None`.
pub fn parse_callback(id: &str, data: &str) -> Option<CalendarEvent> {
    let rest = data.strip_prefix("cal:")?.strip_prefix(id)?.strip_prefix(':')?;
    if let Some(day) = rest.strip_prefix("day:") {
        return NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .ok()
            .map(CalendarEvent::Day);
    }
    if let Some(month) = rest.strip_prefix("month:") {
        let (year, month) = month.split_once('-')?;
        let year = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        return Some(CalendarEvent::Month { year, month });
    }
    if let Some(year) = rest.strip_prefix("year:") {
        return year.parse().ok().map(CalendarEvent::Year);
    }
    match rest {
        "nav:prev" => Some(CalendarEvent::PrevPage),
        "nav:next" => Some(CalendarEvent::NextPage),
        "zoom" => Some(CalendarEvent::ZoomOut),
        _ => None,
    }
}

/// Calendar that renders item membership only. Selection is
/// single-exclusive and entirely host-driven: clicking a day reports
/// it without touching the stored selection.
#[derive(Debug, Clone)]
pub struct MarkedCalendar {
    core: CalendarCore,
}

impl MarkedCalendar {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: CalendarCore::new(id),
        }
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn get_checked(&self, store: &WidgetStateStore) -> Option<NaiveDate> {
        match store.calendar(self.id()).map(|s| &s.selection) {
            Some(Selection::Single(day)) => Some(*day),
            _ => None,
        }
    }

    /// Replaces the selection with `day`.
    pub fn set_checked(&self, store: &mut WidgetStateStore, day: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), day);
        state.selection = Selection::Single(day);
    }

    pub fn reset_checked(&self, store: &mut WidgetStateStore, today: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), today);
        state.selection = Selection::None;
    }

    /// Applies navigation; a day click is returned to the host
    /// untouched.
    pub fn handle_event(
        &self,
        store: &mut WidgetStateStore,
        today: NaiveDate,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        if self.core.apply_navigation(store, today, event) {
            return None;
        }
        match event {
            CalendarEvent::Day(day) => Some(day),
            _ => None,
        }
    }

    pub fn render(
        &self,
        store: &WidgetStateStore,
        items: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> InlineKeyboardMarkup {
        let state = self.core.view_state(store, today);
        self.core
            .render(&state, today, &|day| marked_glyph(day, items.contains(&day)))
    }
}

/// Calendar holding at most one selected date; clicking a day replaces
/// the previous selection.
#[derive(Debug, Clone)]
pub struct RadioCalendar {
    core: CalendarCore,
}

impl RadioCalendar {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: CalendarCore::new(id),
        }
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn get_checked(&self, store: &WidgetStateStore) -> Option<NaiveDate> {
        match store.calendar(self.id()).map(|s| &s.selection) {
            Some(Selection::Single(day)) => Some(*day),
            _ => None,
        }
    }

    pub fn is_checked(&self, store: &WidgetStateStore, day: NaiveDate) -> bool {
        self.get_checked(store) == Some(day)
    }

    pub fn set_checked(&self, store: &mut WidgetStateStore, day: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), day);
        state.selection = Selection::Single(day);
    }

    pub fn reset_checked(&self, store: &mut WidgetStateStore, today: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), today);
        state.selection = Selection::None;
    }

    pub fn set_offset(&self, store: &mut WidgetStateStore, new_offset: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), new_offset);
        state.offset = first_of_month(new_offset);
    }

    /// Applies the event; a day click selects the date and returns it
    /// for the host's on-click hook.
    pub fn handle_event(
        &self,
        store: &mut WidgetStateStore,
        today: NaiveDate,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        if self.core.apply_navigation(store, today, event) {
            return None;
        }
        match event {
            CalendarEvent::Day(day) => {
                self.set_checked(store, day);
                Some(day)
            }
            _ => None,
        }
    }

    pub fn render(
        &self,
        store: &WidgetStateStore,
        items: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> InlineKeyboardMarkup {
        let state = self.core.view_state(store, today);
        let checked = self.get_checked(store);
        self.core.render(&state, today, &|day| {
            day_glyph(day, checked == Some(day), items.contains(&day))
        })
    }
}

/// Calendar holding a set of selected dates. The set preserves
/// insertion order and holds no duplicates. The item set gates display
/// only: a date outside it can still be toggled.
#[derive(Debug, Clone)]
pub struct MultiselectCalendar {
    core: CalendarCore,
}

impl MultiselectCalendar {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: CalendarCore::new(id),
        }
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn get_checked(&self, store: &WidgetStateStore) -> Vec<NaiveDate> {
        match store.calendar(self.id()).map(|s| &s.selection) {
            Some(Selection::Many(days)) => days.clone(),
            _ => Vec::new(),
        }
    }

    pub fn is_checked(&self, store: &WidgetStateStore, day: NaiveDate) -> bool {
        self.get_checked(store).contains(&day)
    }

    /// Adds the date when `checked` and absent, removes it when not
    /// `checked` and present. Idempotent in both directions.
    pub fn set_checked(&self, store: &mut WidgetStateStore, day: NaiveDate, checked: bool) {
        let state = store.calendar_or_insert(self.id(), day);
        let mut days = match &state.selection {
            Selection::Many(days) => days.clone(),
            _ => Vec::new(),
        };
        if days.contains(&day) {
            if !checked {
                days.retain(|d| *d != day);
            }
        } else if checked {
            days.push(day);
        }
        state.selection = Selection::Many(days);
    }

    pub fn reset_checked(&self, store: &mut WidgetStateStore, today: NaiveDate) {
        let state = store.calendar_or_insert(self.id(), today);
        state.selection = Selection::Many(Vec::new());
    }

    /// Applies the event; a day click toggles membership and returns
    /// the date for the host's on-click hook.
    pub fn handle_event(
        &self,
        store: &mut WidgetStateStore,
        today: NaiveDate,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        if self.core.apply_navigation(store, today, event) {
            return None;
        }
        match event {
            CalendarEvent::Day(day) => {
                let checked = self.is_checked(store, day);
                self.set_checked(store, day, !checked);
                Some(day)
            }
            _ => None,
        }
    }

    pub fn render(
        &self,
        store: &WidgetStateStore,
        items: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> InlineKeyboardMarkup {
        let state = self.core.view_state(store, today);
        let checked: HashSet<NaiveDate> = self.get_checked(store).into_iter().collect();
        self.core.render(&state, today, &|day| {
            day_glyph(day, checked.contains(&day), items.contains(&day))
        })
    }
}
