use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::handlers::{view, HandlerResult};
use crate::bot::BotClient;
use crate::context::AppContext;
use crate::dialogs::{BotDialogue, DialogContext, DialogueState, Screen};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Open the main menu")]
    Start,
}

pub async fn command_handler(
    bot: BotClient,
    msg: Message,
    cmd: Command,
    dialogue: BotDialogue,
    app: AppContext,
) -> HandlerResult {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            let ctx = DialogContext::new(Screen::Menu);
            let items: HashSet<NaiveDate> = app.db.marked_days().await?.into_iter().collect();
            let today = Utc::now().date_naive();

            bot.send_message(msg.chat.id, view::screen_text(&ctx, &items))
                .reply_markup(view::screen_keyboard(&ctx, &items, today))
                .await?;
            dialogue.update(DialogueState::Active(ctx)).await?;
        }
    }
    Ok(())
}
