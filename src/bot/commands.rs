//! Slash commands understood by the bot.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "show what the bot does")]
    Start,
    #[command(description = "bind the bot to your user id: /bind <id>")]
    Bind(String),
    #[command(description = "release the binding")]
    Unbind,
    #[command(description = "manage accounts and folders")]
    Settings,
}
