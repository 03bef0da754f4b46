/// Update routing and per-screen rendering
pub mod handlers;
/// Logging interceptors at the dispatcher boundary
pub mod middleware;

use anyhow::Result;
use std::sync::Arc;
use teloxide::adaptors::trace::{self, Trace};
use teloxide::dispatching::dialogue::serializer::Bincode;
use teloxide::dispatching::dialogue::{ErasedStorage, InMemStorage, RedisStorage, Storage};
use teloxide::dispatching::DefaultKey;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;

use crate::config::{BotConfig, StorageConfig};
use crate::context::AppContext;
use crate::dialogs::DialogueState;

/// Bot client wrapped in the trace adaptor: every outbound API call is
/// logged, which is the outbound-request middleware of this bot.
pub type BotClient = Trace<Bot>;

pub fn create_bot(config: &BotConfig) -> BotClient {
    Bot::new(config.bot_token.clone()).trace(trace::Settings::TRACE_EVERYTHING)
}

pub type DialogueStorage = Arc<ErasedStorage<DialogueState>>;

/// Selects the dialogue-state backend from configuration: process
/// memory or redis.
pub async fn create_dialogue_storage(storage_config: &StorageConfig) -> Result<DialogueStorage> {
    let storage = match storage_config {
        StorageConfig::Memory => InMemStorage::new().erase(),
        StorageConfig::Redis(redis) => {
            RedisStorage::open(redis.url().as_str(), Bincode).await?.erase()
        }
    };
    Ok(storage)
}

/// Builds the dispatcher: handler schema, dependency map, boundary
/// error handler and a logger for updates nothing claimed.
pub fn create_dispatcher(
    bot: BotClient,
    app: AppContext,
    storage: DialogueStorage,
) -> Dispatcher<BotClient, Box<dyn std::error::Error + Send + Sync + 'static>, DefaultKey> {
    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![storage, app])
        .default_handler(|update| async move {
            tracing::warn!(update_id = update.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("error in update handler"))
        .enable_ctrlc_handler()
        .build()
}
