pub mod callback;
pub mod message;
pub mod view;

use teloxide::dispatching::dialogue::ErasedStorage;
use teloxide::dispatching::{dialogue, UpdateHandler};
use teloxide::prelude::*;

use crate::bot::middleware;
use crate::dialogs::DialogueState;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// The update-routing tree: inbound logging first, then dialogue
/// entry, then the command and callback branches.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dialogue::enter::<Update, ErasedStorage<DialogueState>, DialogueState, _>()
        .filter(middleware::log_update)
        .branch(
            Update::filter_message()
                .filter_command::<message::Command>()
                .endpoint(message::command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback::callback_handler))
}
