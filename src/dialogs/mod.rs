//! Dialogue model: the set of screens a conversation can be on and the
//! per-conversation context that travels through the dialogue storage
//! backend (in-memory or redis).

/// Typed per-widget view state owned by the dialog context
pub mod state;
/// Reusable keyboard widgets: calendars, pager, tabs, cancel
pub mod widgets;

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, ErasedStorage};

use crate::dialogs::state::WidgetStateStore;

/// One screen of the conversational UI. Screens belong to named groups
/// so tab buttons can compare either exact identity or group
/// membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    PickDay,
    PickDays,
    Browse,
}

impl Screen {
    pub fn group(self) -> &'static str {
        match self {
            Screen::Menu => "main",
            Screen::PickDay | Screen::PickDays => "schedule",
            Screen::Browse => "library",
        }
    }

    /// Screens of a group in navigation order.
    fn group_members(self) -> &'static [Screen] {
        match self {
            Screen::Menu => &[Screen::Menu],
            Screen::PickDay | Screen::PickDays => &[Screen::PickDay, Screen::PickDays],
            Screen::Browse => &[Screen::Browse],
        }
    }

    pub fn is_first_in_group(self) -> bool {
        self.group_members().first() == Some(&self)
    }

    /// The screen one step back within the same group, if any.
    pub fn prev_in_group(self) -> Option<Screen> {
        let members = self.group_members();
        let position = members.iter().position(|s| *s == self)?;
        position.checked_sub(1).map(|i| members[i])
    }
}

/// Everything one active conversation owns: the screen it is on and
/// the state of every widget rendered on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogContext {
    pub screen: Screen,
    pub widgets: WidgetStateStore,
}

impl DialogContext {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            widgets: WidgetStateStore::default(),
        }
    }
}

/// Dialogue state persisted by the storage backend. A fresh chat has
/// no context at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DialogueState {
    #[default]
    Idle,
    Active(DialogContext),
}

pub type BotDialogue = Dialogue<DialogueState, ErasedStorage<DialogueState>>;
