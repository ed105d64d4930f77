//! Telegram front-end: commands, message routing, inline keyboards.

pub mod callback;
pub mod commands;
pub mod format;
pub mod handlers;
pub mod keyboards;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::state::AppState;

/// Registers commands and runs the long-polling dispatcher until shutdown.
pub async fn run(bot: Bot, state: Arc<AppState>) -> anyhow::Result<()> {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(%e, "failed to register bot commands");
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handlers::command_handler),
                )
                .endpoint(handlers::message_handler),
        )
        .branch(Update::filter_callback_query().endpoint(handlers::callback_handler));

    tracing::info!("bot dispatcher started");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("bot dispatcher stopped");
    Ok(())
}
