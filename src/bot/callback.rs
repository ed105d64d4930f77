//! Typed callback-query payloads.
//!
//! Inline-keyboard buttons carry compact `prefix:payload` strings (Telegram
//! caps callback data at 64 bytes); this module parses them back into a
//! typed action so the handler can match exhaustively.

use std::str::FromStr;

/// Every button press the bot can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Destination choice: an account was picked for a parked message.
    PickAccount(String),
    /// Destination choice: a folder was picked; the dispatch can run.
    PickFolder { account: String, folder_id: String },
    /// Settings: back to the account list.
    Accounts,
    /// Settings: open one account's menu.
    Account(String),
    /// Settings: start the add-account wizard.
    AddAccount,
    /// Settings: start the change-cookie wizard for an account.
    ChangeCookie(String),
    /// Settings: delete an account.
    DeleteAccount(String),
    /// Settings: show an account's folder list.
    Folders(String),
    /// Settings: open one folder's menu.
    Folder { account: String, label: String },
    /// Settings: start the add-folder wizard for an account.
    AddFolder(String),
    /// Settings: delete a folder.
    DeleteFolder { account: String, label: String },
    /// Settings: close the menu.
    Exit,
}

/// Error for unrecognized callback data; carries the raw payload for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCallback(pub String);

impl std::fmt::Display for UnknownCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized callback data: {}", self.0)
    }
}

impl std::error::Error for UnknownCallback {}

fn split_pair(payload: &str) -> Option<(&str, &str)> {
    payload.split_once('|')
}

impl FromStr for CallbackAction {
    type Err = UnknownCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(data.to_string());

        if let Some(name) = data.strip_prefix("dest:acct:") {
            return Ok(Self::PickAccount(name.to_string()));
        }
        if let Some(payload) = data.strip_prefix("dest:cid:") {
            let (account, folder_id) = split_pair(payload).ok_or_else(unknown)?;
            return Ok(Self::PickFolder {
                account: account.to_string(),
                folder_id: folder_id.to_string(),
            });
        }

        match data {
            "set:accounts" => return Ok(Self::Accounts),
            "set:add" => return Ok(Self::AddAccount),
            "set:exit" => return Ok(Self::Exit),
            _ => {}
        }

        if let Some(name) = data.strip_prefix("set:acct:") {
            return Ok(Self::Account(name.to_string()));
        }
        if let Some(name) = data.strip_prefix("set:cookie:") {
            return Ok(Self::ChangeCookie(name.to_string()));
        }
        if let Some(name) = data.strip_prefix("set:del:") {
            return Ok(Self::DeleteAccount(name.to_string()));
        }
        if let Some(name) = data.strip_prefix("set:folders:") {
            return Ok(Self::Folders(name.to_string()));
        }
        if let Some(payload) = data.strip_prefix("set:fold:") {
            let (account, label) = split_pair(payload).ok_or_else(unknown)?;
            return Ok(Self::Folder {
                account: account.to_string(),
                label: label.to_string(),
            });
        }
        if let Some(name) = data.strip_prefix("set:addfold:") {
            return Ok(Self::AddFolder(name.to_string()));
        }
        if let Some(payload) = data.strip_prefix("set:delfold:") {
            let (account, label) = split_pair(payload).ok_or_else(unknown)?;
            return Ok(Self::DeleteFolder {
                account: account.to_string(),
                label: label.to_string(),
            });
        }

        Err(unknown())
    }
}
