//! Entry point: loads configuration, initializes logging and the
//! database, builds the bot and dispatcher, then polls until shutdown.

use anyhow::Result;
use tracing::info;

use teleframe_bot::bot::{create_bot, create_dialogue_storage, create_dispatcher};
use teleframe_bot::config::BotConfig;
use teleframe_bot::context::AppContext;
use teleframe_bot::utils::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Configuration errors abort before anything touches the network.
    let config = BotConfig::load()?;
    setup_logging(&config.logging_config_path);

    info!("Starting teleframe-bot v{}", env!("CARGO_PKG_VERSION"));

    let app = AppContext::initialize(config.clone()).await?;
    info!("Database initialized");

    let bot = create_bot(&config);
    let storage = create_dialogue_storage(&config.storage).await?;
    let mut dispatcher = create_dispatcher(bot, app, storage);

    info!("Dispatcher built, starting polling");
    dispatcher.dispatch().await;

    info!("Application stopped");
    Ok(())
}
