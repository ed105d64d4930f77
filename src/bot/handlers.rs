//! Message and callback handlers.
//!
//! Every update passes the binding gate first. Text messages are routed by
//! content: link-bearing messages go through destination resolution and the
//! dispatch pipeline, anything else feeds the settings wizard if one is
//! active. Callback queries carry destination picks and settings-menu
//! navigation.

use std::str::FromStr;
use std::sync::Arc;

use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, MessageEntityKind, MessageId};
use teloxide::utils::command::BotCommands;

use crate::application::services::{
    BindResult, BindingService, Destination, DispatchService, SettingsService, UnbindResult,
    resolver,
};
use crate::application::sessions::{PendingMessage, SessionState, WizardStep};
use crate::bot::callback::CallbackAction;
use crate::bot::commands::Command;
use crate::bot::format::render_report;
use crate::bot::keyboards;
use crate::domain::entities::MessageEntity;
use crate::error::AppError;
use crate::state::AppState;

/// Substrings that mark a message as link-bearing and worth dispatching.
const LINK_MARKERS: [&str; 8] = [
    "115.com",
    "115cdn.com",
    "anxia.com",
    "http://",
    "https://",
    "ftp://",
    "magnet:",
    "ed2k://",
];

const NO_PERMISSION: &str = "you are not allowed to use this bot";

/// Handles slash commands.
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let binding = BindingService::new(state.store.clone());
    if !binding.permits(user_id).await? {
        bot.send_message(chat_id, NO_PERMISSION).await?;
        return Ok(());
    }

    match cmd {
        Command::Start => {
            let text = format!(
                "Send me 115 share links, URLs, magnet or ed2k links and I will \
                 save them to your cloud storage.\n\n{}",
                Command::descriptions()
            );
            bot.send_message(chat_id, text).await?;
        }
        Command::Bind(arg) => {
            let Ok(requested_id) = arg.trim().parse::<i64>() else {
                bot.send_message(chat_id, format!("usage: /bind {user_id}"))
                    .await?;
                return Ok(());
            };
            let reply = match binding.bind(user_id, requested_id).await? {
                BindResult::Bound => "bound, the bot now answers only to you".to_string(),
                BindResult::AlreadyBound => "already bound to another user".to_string(),
                BindResult::IdMismatch => {
                    format!("that is not your id, yours is {user_id}")
                }
            };
            bot.send_message(chat_id, reply).await?;
        }
        Command::Unbind => {
            let reply = match binding.unbind().await? {
                UnbindResult::Unbound => "binding released",
                UnbindResult::NotBound => "the bot is not bound",
            };
            bot.send_message(chat_id, reply).await?;
        }
        Command::Settings => {
            state.sessions.clear(chat_id.0);
            let book = SettingsService::new(state.store.clone()).book().await?;
            bot.send_message(chat_id, "Accounts:")
                .reply_markup(keyboards::settings_accounts_keyboard(&book))
                .await?;
        }
    }

    Ok(())
}

/// Handles plain text messages: link dispatch or wizard input.
pub async fn message_handler(bot: Bot, msg: Message, state: Arc<AppState>) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let binding = BindingService::new(state.store.clone());
    if !binding.permits(user_id).await? {
        bot.send_message(chat_id, NO_PERMISSION).await?;
        return Ok(());
    }

    let entities = literal_link_entities(&msg);
    if looks_like_link(text, &entities) {
        handle_link_message(&bot, chat_id, text, entities, &state).await?;
        return Ok(());
    }

    // Only a wizard session consumes free text; a parked destination choice
    // stays put until its keyboard is answered.
    if let Some(SessionState::Wizard(step)) = state.sessions.get(chat_id.0) {
        state.sessions.clear(chat_id.0);
        advance_wizard(&bot, chat_id, &state, step, text.trim()).await?;
    }

    Ok(())
}

/// Handles button presses from inline keyboards.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let (Some(data), Some(MaybeInaccessibleMessage::Regular(message))) = (q.data, q.message) else {
        return Ok(());
    };
    let user_id = q.from.id.0 as i64;
    let chat_id = message.chat.id;
    let msg_id = message.id;

    let binding = BindingService::new(state.store.clone());
    if !binding.permits(user_id).await? {
        bot.edit_message_text(chat_id, msg_id, NO_PERMISSION).await?;
        return Ok(());
    }

    let action = match CallbackAction::from_str(&data) {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!(%e, "ignoring callback");
            return Ok(());
        }
    };

    let settings = SettingsService::new(state.store.clone());
    match action {
        CallbackAction::PickAccount(name) => {
            let book = settings.book().await?;
            match resolver::resolve_account(&book, &name) {
                Some(Destination::Resolved {
                    cookie, folder_id, ..
                }) => {
                    dispatch_pending(&bot, chat_id, msg_id, &state, &cookie, &folder_id).await?;
                }
                Some(Destination::SelectFolder { account, folders }) => {
                    // The parked message stays in the session until the
                    // folder pick lands.
                    bot.edit_message_text(chat_id, msg_id, "Pick a folder:")
                        .reply_markup(keyboards::pick_folder_keyboard(&account, &folders))
                        .await?;
                }
                _ => {
                    state.sessions.clear(chat_id.0);
                    bot.edit_message_text(chat_id, msg_id, "that account no longer exists")
                        .await?;
                }
            }
        }
        CallbackAction::PickFolder { account, folder_id } => {
            let book = settings.book().await?;
            match book.accounts.get(&account) {
                Some(acc) => {
                    let cookie = acc.cookie.clone();
                    dispatch_pending(&bot, chat_id, msg_id, &state, &cookie, &folder_id).await?;
                }
                None => {
                    state.sessions.clear(chat_id.0);
                    bot.edit_message_text(chat_id, msg_id, "that account no longer exists")
                        .await?;
                }
            }
        }
        CallbackAction::Accounts => {
            let book = settings.book().await?;
            bot.edit_message_text(chat_id, msg_id, "Accounts:")
                .reply_markup(keyboards::settings_accounts_keyboard(&book))
                .await?;
        }
        CallbackAction::Account(name) => {
            bot.edit_message_text(chat_id, msg_id, format!("Account {name}:"))
                .reply_markup(keyboards::settings_account_keyboard(&name))
                .await?;
        }
        CallbackAction::AddAccount => {
            state
                .sessions
                .set(chat_id.0, SessionState::Wizard(WizardStep::AccountName));
            bot.edit_message_text(chat_id, msg_id, "send a name for the new account")
                .await?;
        }
        CallbackAction::ChangeCookie(name) => {
            state.sessions.set(
                chat_id.0,
                SessionState::Wizard(WizardStep::NewCookie { account: name }),
            );
            bot.edit_message_text(chat_id, msg_id, "send the new cookie")
                .await?;
        }
        CallbackAction::DeleteAccount(name) => {
            let text = if settings.delete_account(&name).await? {
                format!("account {name} deleted")
            } else {
                format!("no account named {name}")
            };
            let book = settings.book().await?;
            bot.edit_message_text(chat_id, msg_id, format!("{text}\n\nAccounts:"))
                .reply_markup(keyboards::settings_accounts_keyboard(&book))
                .await?;
        }
        CallbackAction::Folders(name) => {
            show_folders(&bot, chat_id, msg_id, &settings, &name).await?;
        }
        CallbackAction::Folder { account, label } => {
            bot.edit_message_text(chat_id, msg_id, format!("Folder {label}:"))
                .reply_markup(keyboards::settings_folder_keyboard(&account, &label))
                .await?;
        }
        CallbackAction::AddFolder(account) => {
            state.sessions.set(
                chat_id.0,
                SessionState::Wizard(WizardStep::FolderLabel { account }),
            );
            bot.edit_message_text(chat_id, msg_id, "send a label for the new folder")
                .await?;
        }
        CallbackAction::DeleteFolder { account, label } => {
            settings.delete_folder(&account, &label).await?;
            show_folders(&bot, chat_id, msg_id, &settings, &account).await?;
        }
        CallbackAction::Exit => {
            state.sessions.clear(chat_id.0);
            bot.edit_message_text(chat_id, msg_id, "settings closed").await?;
        }
    }

    Ok(())
}

/// Extracts literal-link annotations from a message.
fn literal_link_entities(msg: &Message) -> Vec<MessageEntity> {
    msg.entities()
        .unwrap_or_default()
        .iter()
        .filter_map(|entity| match &entity.kind {
            MessageEntityKind::TextLink { url } => {
                Some(MessageEntity::TextLink(url.to_string()))
            }
            _ => None,
        })
        .collect()
}

/// Cheap pre-filter: is there anything in this message worth classifying?
fn looks_like_link(text: &str, entities: &[MessageEntity]) -> bool {
    !entities.is_empty() || LINK_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Resolves a destination for a link-bearing message and either dispatches it
/// or parks it behind a selection keyboard.
async fn handle_link_message(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    entities: Vec<MessageEntity>,
    state: &Arc<AppState>,
) -> anyhow::Result<()> {
    let book = state.store_book().await?;

    match resolver::resolve(&book) {
        Destination::NoAccounts => {
            bot.send_message(chat_id, "no account configured, use /settings first")
                .await?;
        }
        Destination::Resolved {
            cookie, folder_id, ..
        } => {
            let reply = run_dispatch(state, &cookie, &folder_id, text, &entities).await?;
            bot.send_message(chat_id, reply).await?;
        }
        Destination::SelectAccount { accounts } => {
            state.sessions.set(
                chat_id.0,
                SessionState::AwaitingDestination {
                    pending: PendingMessage {
                        text: text.to_string(),
                        entities,
                    },
                },
            );
            bot.send_message(chat_id, "Pick an account:")
                .reply_markup(keyboards::pick_account_keyboard(&accounts))
                .await?;
        }
        Destination::SelectFolder { account, folders } => {
            state.sessions.set(
                chat_id.0,
                SessionState::AwaitingDestination {
                    pending: PendingMessage {
                        text: text.to_string(),
                        entities,
                    },
                },
            );
            bot.send_message(chat_id, "Pick a folder:")
                .reply_markup(keyboards::pick_folder_keyboard(&account, &folders))
                .await?;
        }
    }

    Ok(())
}

/// Dispatches the parked message of this chat to the chosen destination.
async fn dispatch_pending(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: MessageId,
    state: &Arc<AppState>,
    cookie: &str,
    folder_id: &str,
) -> anyhow::Result<()> {
    let Some(pending) = state.sessions.take_pending(chat_id.0) else {
        bot.edit_message_text(chat_id, msg_id, "nothing pending for this chat")
            .await?;
        return Ok(());
    };

    let reply = run_dispatch(state, cookie, folder_id, &pending.text, &pending.entities).await?;
    bot.edit_message_text(chat_id, msg_id, reply).await?;
    Ok(())
}

/// Runs the dispatch pipeline against one account/folder and renders the report.
async fn run_dispatch(
    state: &Arc<AppState>,
    cookie: &str,
    folder_id: &str,
    text: &str,
    entities: &[MessageEntity],
) -> Result<String, AppError> {
    let client = state.storage_client(cookie)?;
    let service = DispatchService::new(Arc::new(client), state.transfer_delay);
    let report = service.dispatch(text, folder_id, entities).await;
    Ok(render_report(&report))
}

/// Checks a cookie against the storage service, returning the account holder's
/// display name.
async fn verify_cookie(state: &Arc<AppState>, cookie: &str) -> Result<String, AppError> {
    use crate::domain::repositories::StorageClient;

    let client = state.storage_client(cookie)?;
    Ok(client.user_info().await?.user_name)
}

/// Advances the settings wizard by one step with the user's text input.
///
/// The step was already taken out of the session store; every branch either
/// re-arms the session with the next (or same) step or leaves it cleared when
/// the wizard is done.
async fn advance_wizard(
    bot: &Bot,
    chat_id: ChatId,
    state: &Arc<AppState>,
    step: WizardStep,
    input: &str,
) -> anyhow::Result<()> {
    let settings = SettingsService::new(state.store.clone());
    let rearm = |step: WizardStep| state.sessions.set(chat_id.0, SessionState::Wizard(step));

    match step {
        WizardStep::AccountName => {
            let book = settings.book().await?;
            if book.accounts.contains_key(input) {
                rearm(WizardStep::AccountName);
                bot.send_message(chat_id, "that name is taken, send another")
                    .await?;
            } else {
                rearm(WizardStep::AccountCookie {
                    name: input.to_string(),
                });
                bot.send_message(chat_id, "send the account cookie").await?;
            }
        }
        WizardStep::AccountCookie { name } => {
            let book = settings.book().await?;
            if book.accounts.values().any(|a| a.cookie == input) {
                rearm(WizardStep::AccountCookie { name });
                bot.send_message(chat_id, "that cookie is already stored, send another")
                    .await?;
                return Ok(());
            }
            match verify_cookie(state, input).await {
                Ok(user_name) => {
                    rearm(WizardStep::AccountFolderLabel {
                        name,
                        cookie: input.to_string(),
                    });
                    bot.send_message(
                        chat_id,
                        format!("hello {user_name}, now send a label for the first folder"),
                    )
                    .await?;
                }
                Err(e) => {
                    tracing::warn!(%e, "cookie verification failed");
                    rearm(WizardStep::AccountCookie { name });
                    bot.send_message(chat_id, "that cookie does not work, send another")
                        .await?;
                }
            }
        }
        WizardStep::AccountFolderLabel { name, cookie } => {
            rearm(WizardStep::AccountFolderId {
                name,
                cookie,
                label: input.to_string(),
            });
            bot.send_message(chat_id, "send the folder id (cid)").await?;
        }
        WizardStep::AccountFolderId {
            name,
            cookie,
            label,
        } => match settings.add_account(&name, &cookie, &label, input).await {
            Ok(()) => {
                bot.send_message(chat_id, format!("account {name} added"))
                    .await?;
            }
            Err(AppError::Validation { message, .. }) => {
                bot.send_message(chat_id, format!("could not add the account: {message}"))
                    .await?;
            }
            Err(e) => return Err(e.into()),
        },
        WizardStep::FolderLabel { account } => {
            let book = settings.book().await?;
            let taken = book
                .accounts
                .get(&account)
                .is_some_and(|a| a.folders.contains_key(input));
            if taken {
                rearm(WizardStep::FolderLabel { account });
                bot.send_message(chat_id, "that label is taken, send another")
                    .await?;
            } else {
                rearm(WizardStep::FolderId {
                    account,
                    label: input.to_string(),
                });
                bot.send_message(chat_id, "send the folder id (cid)").await?;
            }
        }
        WizardStep::FolderId { account, label } => {
            match settings.add_folder(&account, &label, input).await {
                Ok(()) => {
                    bot.send_message(chat_id, format!("folder {label} added"))
                        .await?;
                }
                Err(AppError::Validation { message, .. }) => {
                    rearm(WizardStep::FolderId { account, label });
                    bot.send_message(chat_id, format!("{message}, send another id"))
                        .await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        WizardStep::NewCookie { account } => {
            let book = settings.book().await?;
            if book.accounts.values().any(|a| a.cookie == input) {
                rearm(WizardStep::NewCookie { account });
                bot.send_message(chat_id, "that cookie is already stored, send another")
                    .await?;
                return Ok(());
            }
            match verify_cookie(state, input).await {
                Ok(user_name) => match settings.update_cookie(&account, input).await {
                    Ok(()) => {
                        bot.send_message(
                            chat_id,
                            format!("cookie for {account} replaced, hello {user_name}"),
                        )
                        .await?;
                    }
                    Err(AppError::Validation { message, .. }) => {
                        bot.send_message(chat_id, message).await?;
                    }
                    Err(e) => return Err(e.into()),
                },
                Err(e) => {
                    tracing::warn!(%e, "cookie verification failed");
                    rearm(WizardStep::NewCookie { account });
                    bot.send_message(chat_id, "that cookie does not work, send another")
                        .await?;
                }
            }
        }
    }

    Ok(())
}

/// Edits the message into an account's folder list.
async fn show_folders(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: MessageId,
    settings: &SettingsService<crate::infrastructure::persistence::JsonAccountStore>,
    account: &str,
) -> anyhow::Result<()> {
    let book = settings.book().await?;
    let Some(acc) = book.accounts.get(account) else {
        bot.edit_message_text(chat_id, msg_id, "that account no longer exists")
            .await?;
        return Ok(());
    };

    let folders: Vec<(String, String)> = acc
        .folders
        .iter()
        .map(|(label, cid)| (label.clone(), cid.clone()))
        .collect();
    bot.edit_message_text(chat_id, msg_id, format!("Folders of {account}:"))
        .reply_markup(keyboards::settings_folders_keyboard(account, &folders))
        .await?;
    Ok(())
}
