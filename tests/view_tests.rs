#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use std::collections::HashSet;

use teleframe_bot::bot::handlers::view;
use teleframe_bot::dialogs::{DialogContext, Screen};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn items(days: &[NaiveDate]) -> HashSet<NaiveDate> {
    days.iter().copied().collect()
}

#[test]
fn test_menu_keyboard_is_tab_bar_only() {
    let ctx = DialogContext::new(Screen::Menu);
    let markup = view::screen_keyboard(&ctx, &HashSet::new(), date(2024, 5, 15));

    assert_eq!(markup.inline_keyboard.len(), 1);
    assert_eq!(markup.inline_keyboard[0].len(), view::tabs().len());
}

#[test]
fn test_pick_day_keyboard_has_calendar_and_cancel() {
    let ctx = DialogContext::new(Screen::PickDay);
    let markup = view::screen_keyboard(&ctx, &HashSet::new(), date(2024, 5, 15));

    let rows = &markup.inline_keyboard;
    // tab bar + calendar header + weekdays + 5 weeks + nav + cancel
    assert_eq!(rows.len(), 10);
    assert_eq!(rows.last().unwrap()[0].text, "Cancel");
}

#[test]
fn test_pick_days_keyboard_has_save_row() {
    let ctx = DialogContext::new(Screen::PickDays);
    let markup = view::screen_keyboard(&ctx, &HashSet::new(), date(2024, 5, 15));

    let rows = &markup.inline_keyboard;
    let save_row = &rows[rows.len() - 2];
    assert_eq!(save_row[0].text, "Save");
}

#[test]
fn test_browse_keyboard_includes_pager_row() {
    let days: Vec<NaiveDate> = (1..=12).map(|d| date(2024, 5, d)).collect();
    let ctx = DialogContext::new(Screen::Browse);
    let markup = view::screen_keyboard(&ctx, &items(&days), date(2024, 5, 15));

    // 12 items at 5 per page -> 3 pages, pager width 5 shows all 3.
    let rows = &markup.inline_keyboard;
    let pager_row = &rows[rows.len() - 2];
    assert_eq!(pager_row.len(), 3);
    assert_eq!(pager_row[0].text, "[ 1 ]");
}

#[test]
fn test_browse_pages_rounds_up() {
    assert_eq!(view::browse_pages(0), 1);
    assert_eq!(view::browse_pages(5), 1);
    assert_eq!(view::browse_pages(6), 2);
    assert_eq!(view::browse_pages(12), 3);
}

#[test]
fn test_browse_text_lists_current_page_window() {
    let days: Vec<NaiveDate> = (1..=7).map(|d| date(2024, 5, d)).collect();
    let mut ctx = DialogContext::new(Screen::Browse);
    ctx.widgets.set_pager_page(view::BROWSE_PAGER_ID, 1);

    let text = view::screen_text(&ctx, &items(&days));
    assert!(text.contains("page 2/2"));
    assert!(text.contains("2024-05-06"));
    assert!(text.contains("2024-05-07"));
    assert!(!text.contains("2024-05-01"));
}

#[test]
fn test_browse_text_without_items() {
    let ctx = DialogContext::new(Screen::Browse);
    assert_eq!(view::screen_text(&ctx, &HashSet::new()), "No marked days yet.");
}

#[test]
fn test_pick_day_text_shows_selection() {
    let mut ctx = DialogContext::new(Screen::PickDay);
    view::day_calendar().set_checked(&mut ctx.widgets, date(2024, 5, 10));

    let text = view::screen_text(&ctx, &HashSet::new());
    assert!(text.contains("Selected: 2024-05-10"));
}

#[test]
fn test_stale_pager_page_is_clamped() {
    // Fewer items than the stored page position.
    let days = vec![date(2024, 5, 1)];
    let mut ctx = DialogContext::new(Screen::Browse);
    ctx.widgets.set_pager_page(view::BROWSE_PAGER_ID, 9);

    let text = view::screen_text(&ctx, &items(&days));
    assert!(text.contains("page 1/1"));
}
