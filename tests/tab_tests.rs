#![allow(clippy::unwrap_used)]

use teleframe_bot::dialogs::widgets::{Cancel, CancelDecision, CheckStateMode, TabAction, TabState};
use teleframe_bot::dialogs::Screen;

#[test]
fn test_text_variant_follows_exact_state() {
    let tab = TabState::switch_to("tab", Screen::PickDay, "• Pick day •", "Pick day");

    assert!(tab.is_checked(Screen::PickDay));
    assert_eq!(tab.text(Screen::PickDay), "• Pick day •");

    assert!(!tab.is_checked(Screen::PickDays));
    assert_eq!(tab.text(Screen::PickDays), "Pick day");
}

#[test]
fn test_state_group_mode_checks_group_membership() {
    let tab = TabState::switch_to("tab", Screen::PickDay, "on", "off")
        .with_mode(CheckStateMode::StateGroup);

    // PickDay and PickDays share the "schedule" group.
    assert!(tab.is_checked(Screen::PickDay));
    assert!(tab.is_checked(Screen::PickDays));
    assert!(!tab.is_checked(Screen::Menu));
    assert!(!tab.is_checked(Screen::Browse));
}

#[test]
fn test_click_navigates_to_target() {
    let tab = TabState::switch_to("tab", Screen::Browse, "on", "off");
    assert_eq!(tab.resolve_click(Screen::Menu), Screen::Browse);
    // Without a default, clicking the active tab stays put.
    assert_eq!(tab.resolve_click(Screen::Browse), Screen::Browse);
}

#[test]
fn test_click_on_active_tab_falls_back_to_default() {
    let tab = TabState::switch_to("tab", Screen::PickDay, "on", "off")
        .with_default(Screen::Menu);

    assert_eq!(tab.resolve_click(Screen::Menu), Screen::PickDay);
    assert_eq!(tab.resolve_click(Screen::PickDay), Screen::Menu);
    // The default kicks in only on the exact target screen.
    assert_eq!(tab.resolve_click(Screen::PickDays), Screen::PickDay);
}

#[test]
fn test_tab_action_modes() {
    let switching = TabState::switch_to("a", Screen::Menu, "on", "off");
    assert_eq!(switching.action(), TabAction::SwitchTo);

    let starting = TabState::switch_to("b", Screen::Menu, "on", "off").starting();
    assert_eq!(starting.action(), TabAction::Start);
}

#[test]
fn test_tab_renders_callback_button() {
    let tab = TabState::switch_to("tab_browse", Screen::Browse, "• Browse •", "Browse");
    let button = tab.render(Screen::Menu);
    assert_eq!(button.text, "Browse");
}

#[test]
fn test_cancel_steps_back_mid_group() {
    let cancel = Cancel::new("cancel", Screen::Menu);
    assert_eq!(cancel.decide(Screen::PickDays, 1), CancelDecision::Back(Screen::PickDay));
}

#[test]
fn test_cancel_on_first_screen_restarts_when_stack_is_empty() {
    let cancel = Cancel::new("cancel", Screen::Menu);
    assert_eq!(cancel.decide(Screen::PickDay, 1), CancelDecision::Restart(Screen::Menu));
    assert_eq!(cancel.decide(Screen::Browse, 0), CancelDecision::Restart(Screen::Menu));
}

#[test]
fn test_cancel_on_first_screen_finishes_with_parent_on_stack() {
    let cancel = Cancel::new("cancel", Screen::Menu);
    assert_eq!(cancel.decide(Screen::PickDay, 2), CancelDecision::Done);
}

#[test]
fn test_screen_groups() {
    assert_eq!(Screen::PickDay.group(), "schedule");
    assert_eq!(Screen::PickDays.group(), "schedule");
    assert_eq!(Screen::Menu.group(), "main");
    assert!(Screen::PickDay.is_first_in_group());
    assert!(!Screen::PickDays.is_first_in_group());
    assert_eq!(Screen::PickDays.prev_in_group(), Some(Screen::PickDay));
    assert_eq!(Screen::PickDay.prev_in_group(), None);
}
