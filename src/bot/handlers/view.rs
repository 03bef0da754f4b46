//! Widget composition per screen. Widget instances are cheap value
//! objects identified by fixed ids; their mutable state lives in the
//! dialog context's store.

use chrono::NaiveDate;
use std::collections::HashSet;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::dialogs::widgets::{
    Cancel, CheckStateMode, MarkedCalendar, MultiselectCalendar, PaginationMode, PaginationPager,
    RadioCalendar, TabState,
};
use crate::dialogs::{DialogContext, Screen};

pub const DAY_CALENDAR_ID: &str = "cal_day";
pub const DAYS_CALENDAR_ID: &str = "cal_days";
pub const BROWSE_CALENDAR_ID: &str = "cal_browse";
pub const BROWSE_PAGER_ID: &str = "pager";
pub const SAVE_DAYS_DATA: &str = "save:days";

pub const BROWSE_PAGE_SIZE: usize = 5;

pub fn tabs() -> Vec<TabState> {
    vec![
        TabState::switch_to("tab_menu", Screen::Menu, "• Menu •", "Menu"),
        TabState::switch_to("tab_day", Screen::PickDay, "• Pick day •", "Pick day")
            .with_default(Screen::Menu),
        TabState::switch_to("tab_days", Screen::PickDays, "• Pick days •", "Pick days")
            .with_mode(CheckStateMode::State),
        TabState::switch_to("tab_browse", Screen::Browse, "• Browse •", "Browse")
            .with_mode(CheckStateMode::StateGroup)
            .starting(),
    ]
}

pub fn day_calendar() -> RadioCalendar {
    RadioCalendar::new(DAY_CALENDAR_ID)
}

pub fn days_calendar() -> MultiselectCalendar {
    MultiselectCalendar::new(DAYS_CALENDAR_ID)
}

pub fn browse_calendar() -> MarkedCalendar {
    MarkedCalendar::new(BROWSE_CALENDAR_ID)
}

pub fn browse_pager() -> PaginationPager {
    PaginationPager::new(BROWSE_PAGER_ID, PaginationMode::Centered, 5)
}

pub fn cancel_button() -> Cancel {
    Cancel::new("cancel", Screen::Menu)
}

pub fn browse_pages(total_items: usize) -> usize {
    ((total_items + BROWSE_PAGE_SIZE - 1) / BROWSE_PAGE_SIZE).max(1)
}

/// Full keyboard for the current screen: tab bar on top, the screen's
/// widgets underneath.
pub fn screen_keyboard(
    ctx: &DialogContext,
    items: &HashSet<NaiveDate>,
    today: NaiveDate,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        vec![tabs().iter().map(|tab| tab.render(ctx.screen)).collect()];

    match ctx.screen {
        Screen::Menu => {}
        Screen::PickDay => {
            rows.extend(day_calendar().render(&ctx.widgets, items, today).inline_keyboard);
            rows.push(vec![cancel_button().render()]);
        }
        Screen::PickDays => {
            rows.extend(days_calendar().render(&ctx.widgets, items, today).inline_keyboard);
            rows.push(vec![InlineKeyboardButton::callback(
                "Save".to_string(),
                SAVE_DAYS_DATA.to_string(),
            )]);
            rows.push(vec![cancel_button().render()]);
        }
        Screen::Browse => {
            rows.extend(browse_calendar().render(&ctx.widgets, items, today).inline_keyboard);
            let pages = browse_pages(items.len());
            let page = ctx.widgets.pager_page(BROWSE_PAGER_ID).min(pages - 1);
            rows.push(browse_pager().render(pages, page));
            rows.push(vec![cancel_button().render()]);
        }
    }

    InlineKeyboardMarkup::new(rows)
}

/// Message text accompanying the keyboard.
pub fn screen_text(ctx: &DialogContext, items: &HashSet<NaiveDate>) -> String {
    match ctx.screen {
        Screen::Menu => "Main menu. Pick a tab below.".to_string(),
        Screen::PickDay => match day_calendar().get_checked(&ctx.widgets) {
            Some(day) => format!("Pick a day.\nSelected: {}", day.format("%Y-%m-%d")),
            None => "Pick a day.".to_string(),
        },
        Screen::PickDays => {
            let count = days_calendar().get_checked(&ctx.widgets).len();
            format!("Pick days, then press Save.\nSelected: {}", count)
        }
        Screen::Browse => {
            let mut days: Vec<NaiveDate> = items.iter().copied().collect();
            days.sort();
            if days.is_empty() {
                return "No marked days yet.".to_string();
            }
            let pages = browse_pages(days.len());
            let page = ctx.widgets.pager_page(BROWSE_PAGER_ID).min(pages - 1);
            let start = page * BROWSE_PAGE_SIZE;
            let window = &days[start..(start + BROWSE_PAGE_SIZE).min(days.len())];
            let mut text = format!("Marked days, page {}/{}:\n", page + 1, pages);
            for day in window {
                text.push_str(&format!("• {}\n", day.format("%Y-%m-%d")));
            }
            text
        }
    }
}
