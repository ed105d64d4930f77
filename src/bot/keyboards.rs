//! Inline keyboards for destination selection and the settings menu.
//!
//! Callback data is a compact `prefix:payload` string; the matching parser
//! lives in [`callback::CallbackAction`](super::callback).

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::domain::entities::AccountBook;

/// Buttons per row in list keyboards.
const ROW_WIDTH: usize = 2;

fn rows_of(buttons: Vec<InlineKeyboardButton>) -> Vec<Vec<InlineKeyboardButton>> {
    buttons
        .chunks(ROW_WIDTH)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Account list shown when a message needs a destination account.
pub fn pick_account_keyboard(accounts: &[String]) -> InlineKeyboardMarkup {
    let buttons = accounts
        .iter()
        .map(|name| InlineKeyboardButton::callback(name.clone(), format!("dest:acct:{name}")))
        .collect();
    InlineKeyboardMarkup::new(rows_of(buttons))
}

/// Folder list shown when a chosen account has several folders.
pub fn pick_folder_keyboard(account: &str, folders: &[(String, String)]) -> InlineKeyboardMarkup {
    let buttons = folders
        .iter()
        .map(|(label, cid)| {
            InlineKeyboardButton::callback(label.clone(), format!("dest:cid:{account}|{cid}"))
        })
        .collect();
    InlineKeyboardMarkup::new(rows_of(buttons))
}

/// Top-level settings menu: one button per account plus add/exit.
pub fn settings_accounts_keyboard(book: &AccountBook) -> InlineKeyboardMarkup {
    let mut rows = rows_of(
        book.accounts
            .keys()
            .map(|name| InlineKeyboardButton::callback(name.clone(), format!("set:acct:{name}")))
            .collect(),
    );
    rows.push(vec![
        InlineKeyboardButton::callback("add account", "set:add"),
        InlineKeyboardButton::callback("exit", "set:exit"),
    ]);
    InlineKeyboardMarkup::new(rows)
}

/// Per-account menu: cookie change, delete, folder management.
pub fn settings_account_keyboard(account: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("change cookie", format!("set:cookie:{account}")),
            InlineKeyboardButton::callback("delete", format!("set:del:{account}")),
            InlineKeyboardButton::callback("folders", format!("set:folders:{account}")),
        ],
        vec![
            InlineKeyboardButton::callback("back", "set:accounts"),
            InlineKeyboardButton::callback("exit", "set:exit"),
        ],
    ])
}

/// Folder list for one account inside the settings menu.
pub fn settings_folders_keyboard(
    account: &str,
    folders: &[(String, String)],
) -> InlineKeyboardMarkup {
    let mut rows = rows_of(
        folders
            .iter()
            .map(|(label, _)| {
                InlineKeyboardButton::callback(
                    label.clone(),
                    format!("set:fold:{account}|{label}"),
                )
            })
            .collect(),
    );
    rows.push(vec![InlineKeyboardButton::callback(
        "add folder",
        format!("set:addfold:{account}"),
    )]);
    rows.push(vec![
        InlineKeyboardButton::callback("back", format!("set:acct:{account}")),
        InlineKeyboardButton::callback("exit", "set:exit"),
    ]);
    InlineKeyboardMarkup::new(rows)
}

/// Single-folder menu: delete or go back.
pub fn settings_folder_keyboard(account: &str, label: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "delete",
            format!("set:delfold:{account}|{label}"),
        )],
        vec![
            InlineKeyboardButton::callback("back", format!("set:folders:{account}")),
            InlineKeyboardButton::callback("exit", "set:exit"),
        ],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;

    #[test]
    fn test_pick_account_keyboard_rows() {
        let accounts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let keyboard = pick_account_keyboard(&accounts);
        // Two buttons per row, remainder on its own row.
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[1].len(), 1);
    }

    #[test]
    fn test_settings_accounts_keyboard_has_add_and_exit() {
        let mut book = AccountBook::default();
        book.accounts.insert("main".to_string(), Account::new("c"));

        let keyboard = settings_accounts_keyboard(&book);
        let last_row = keyboard.inline_keyboard.last().unwrap();
        assert_eq!(last_row.len(), 2);
    }

    #[test]
    fn test_folder_keyboard_callback_payload() {
        let folders = vec![("films".to_string(), "42".to_string())];
        let keyboard = pick_folder_keyboard("main", &folders);
        let button = &keyboard.inline_keyboard[0][0];
        match &button.kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, "dest:cid:main|42");
            }
            other => panic!("expected callback button, got {other:?}"),
        }
    }
}
