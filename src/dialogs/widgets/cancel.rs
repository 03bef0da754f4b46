//! Cancel button: steps back within the current screen group, finishes
//! the dialog, or restarts at a fallback screen when there is nothing
//! to go back to.

use teloxide::types::InlineKeyboardButton;

use crate::dialogs::Screen;

/// What the host should do in response to a cancel click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelDecision {
    /// Step back to the previous screen of the group.
    Back(Screen),
    /// Finish the dialog.
    Done,
    /// Restart at the fallback screen.
    Restart(Screen),
}

#[derive(Debug, Clone)]
pub struct Cancel {
    id: String,
    text: String,
    fallback: Screen,
}

impl Cancel {
    pub fn new(id: impl Into<String>, fallback: Screen) -> Self {
        Self {
            id: id.into(),
            text: "Cancel".to_string(),
            fallback,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Decision table: mid-group screens step back; the first screen
    /// of a group finishes the dialog, or restarts at the fallback
    /// when the dialog stack holds nothing underneath.
    pub fn decide(&self, current: Screen, stack_depth: usize) -> CancelDecision {
        if let Some(previous) = current.prev_in_group() {
            return CancelDecision::Back(previous);
        }
        if stack_depth <= 1 {
            CancelDecision::Restart(self.fallback)
        } else {
            CancelDecision::Done
        }
    }

    pub fn render(&self) -> InlineKeyboardButton {
        InlineKeyboardButton::callback(self.text.clone(), format!("cancel:{}", self.id))
    }
}
