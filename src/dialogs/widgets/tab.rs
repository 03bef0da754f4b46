//! Tab-style navigation buttons: one of two text variants depending on
//! whether the dialog is already on (or in the group of) the button's
//! target screen.

use teloxide::types::InlineKeyboardButton;

use crate::dialogs::Screen;

/// How the current screen is compared against the tab's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStateMode {
    /// Exact screen identity.
    State,
    /// Same screen group.
    StateGroup,
}

/// What the host does with the resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    /// Switch within the running dialog.
    SwitchTo,
    /// Restart the dialog at the target with a fresh context.
    Start,
}

/// A two-state navigation button. Clicking navigates to the target
/// screen, or to the configured default when the dialog is already on
/// the target.
#[derive(Debug, Clone)]
pub struct TabState {
    id: String,
    target: Screen,
    default: Option<Screen>,
    mode: CheckStateMode,
    action: TabAction,
    checked_text: String,
    unchecked_text: String,
}

impl TabState {
    pub fn switch_to(
        id: impl Into<String>,
        target: Screen,
        checked_text: impl Into<String>,
        unchecked_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            target,
            default: None,
            mode: CheckStateMode::State,
            action: TabAction::SwitchTo,
            checked_text: checked_text.into(),
            unchecked_text: unchecked_text.into(),
        }
    }

    pub fn starting(mut self) -> Self {
        self.action = TabAction::Start;
        self
    }

    pub fn with_default(mut self, default: Screen) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_mode(mut self, mode: CheckStateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> Screen {
        self.target
    }

    pub fn action(&self) -> TabAction {
        self.action
    }

    pub fn is_checked(&self, current: Screen) -> bool {
        match self.mode {
            CheckStateMode::State => self.target == current,
            CheckStateMode::StateGroup => self.target.group() == current.group(),
        }
    }

    pub fn text(&self, current: Screen) -> &str {
        if self.is_checked(current) {
            &self.checked_text
        } else {
            &self.unchecked_text
        }
    }

    /// Where a click lands: the default screen when already on the
    /// target and a default exists, the target otherwise.
    pub fn resolve_click(&self, current: Screen) -> Screen {
        match self.default {
            Some(default) if self.target == current => default,
            _ => self.target,
        }
    }

    pub fn render(&self, current: Screen) -> InlineKeyboardButton {
        InlineKeyboardButton::callback(self.text(current).to_string(), format!("tab:{}", self.id))
    }
}
