use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use teloxide::prelude::*;

use crate::bot::handlers::{view, HandlerResult};
use crate::bot::BotClient;
use crate::context::AppContext;
use crate::database::transaction::PendingWrite;
use crate::dialogs::widgets::{calendar, CancelDecision, TabAction};
use crate::dialogs::{BotDialogue, DialogContext, DialogueState};

pub async fn callback_handler(
    bot: BotClient,
    q: CallbackQuery,
    dialogue: BotDialogue,
    state: DialogueState,
    app: AppContext,
) -> HandlerResult {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let mut ctx = match state {
        DialogueState::Active(ctx) => ctx,
        DialogueState::Idle => {
            // A click on a keyboard whose dialog no longer exists
            // (unknown or outdated intent). Acknowledged and dropped.
            tracing::debug!(data = %data, "callback without an active dialog");
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
    };
    let before = ctx.clone();

    let today = Utc::now().date_naive();
    let items: HashSet<NaiveDate> = app.db.marked_days().await?.into_iter().collect();
    let mut feedback: Option<String> = None;
    let mut items_changed = false;

    if let Some(tab_id) = data.strip_prefix("tab:") {
        if let Some(tab) = view::tabs().into_iter().find(|tab| tab.id() == tab_id) {
            let target = tab.resolve_click(ctx.screen);
            ctx = match tab.action() {
                TabAction::SwitchTo => {
                    ctx.screen = target;
                    ctx
                }
                TabAction::Start => DialogContext::new(target),
            };
        }
    } else if let Some(cancel_id) = data.strip_prefix("cancel:") {
        let cancel = view::cancel_button();
        if cancel_id == cancel.id() {
            // The dialog is always the only one on its stack here.
            match cancel.decide(ctx.screen, 1) {
                CancelDecision::Back(previous) => ctx.screen = previous,
                CancelDecision::Restart(fallback) => ctx = DialogContext::new(fallback),
                CancelDecision::Done => {
                    dialogue.update(DialogueState::Idle).await?;
                    if let Some(message) = q.message.as_ref() {
                        bot.edit_message_text(message.chat.id, message.id, "Done.")
                            .await?;
                    }
                    bot.answer_callback_query(q.id).await?;
                    return Ok(());
                }
            }
        }
    } else if data.starts_with("pg:") {
        let pager = view::browse_pager();
        if let Some(page) = pager.parse_callback(&data) {
            ctx.widgets.set_pager_page(pager.id(), page);
        }
    } else if data == view::SAVE_DAYS_DATA {
        let selected = view::days_calendar().get_checked(&ctx.widgets);
        let mut tx = app.begin_request().await?;
        tx.queue(PendingWrite::new("clear", "DELETE FROM marked_days"));
        for day in &selected {
            tx.queue(PendingWrite::new(
                "insert",
                format!(
                    "INSERT INTO marked_days (day) VALUES ('{}')",
                    day.format("%Y-%m-%d")
                ),
            ));
        }
        tx.commit().await?;
        items_changed = true;
        feedback = Some(format!("Saved {} day(s)", selected.len()));
    } else if data.starts_with("cal:") {
        let day_cal = view::day_calendar();
        let days_cal = view::days_calendar();
        let browse_cal = view::browse_calendar();
        if let Some(event) = calendar::parse_callback(day_cal.id(), &data) {
            if let Some(picked) = day_cal.handle_event(&mut ctx.widgets, today, event) {
                feedback = Some(format!("Picked {}", picked.format("%Y-%m-%d")));
            }
        } else if let Some(event) = calendar::parse_callback(days_cal.id(), &data) {
            days_cal.handle_event(&mut ctx.widgets, today, event);
        } else if let Some(event) = calendar::parse_callback(browse_cal.id(), &data) {
            if let Some(day) = browse_cal.handle_event(&mut ctx.widgets, today, event) {
                feedback = Some(day.format("%Y-%m-%d").to_string());
            }
        }
    }

    if ctx != before || items_changed {
        dialogue.update(DialogueState::Active(ctx.clone())).await?;

        let items: HashSet<NaiveDate> = if items_changed {
            app.db.marked_days().await?.into_iter().collect()
        } else {
            items
        };
        if let Some(message) = q.message.as_ref() {
            bot.edit_message_text(
                message.chat.id,
                message.id,
                view::screen_text(&ctx, &items),
            )
            .reply_markup(view::screen_keyboard(&ctx, &items, today))
            .await?;
        }
    }

    let answer = bot.answer_callback_query(q.id);
    match feedback {
        Some(text) => answer.text(text).await?,
        None => answer.await?,
    };
    Ok(())
}
