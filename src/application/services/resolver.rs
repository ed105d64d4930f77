//! Destination resolution: deciding where a message's links should land.

use crate::domain::entities::AccountBook;

/// Outcome of resolving a destination for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Nothing configured; report an error upstream.
    NoAccounts,
    /// Exactly one account with exactly one folder: dispatch immediately.
    Resolved {
        account: String,
        cookie: String,
        folder_id: String,
    },
    /// Several accounts: the user must pick one first.
    SelectAccount { accounts: Vec<String> },
    /// One account but several folders: the user must pick the folder.
    SelectFolder {
        account: String,
        folders: Vec<(String, String)>,
    },
}

/// Resolves the destination from the full configuration.
///
/// Pure decision over the account map; the interactive round trip that a
/// `Select*` result triggers is the bot front-end's concern.
pub fn resolve(book: &AccountBook) -> Destination {
    if book.accounts.is_empty() {
        return Destination::NoAccounts;
    }

    match book.sole_account() {
        Some((name, _)) => resolve_account(book, name).unwrap_or(Destination::NoAccounts),
        None => Destination::SelectAccount {
            accounts: book.accounts.keys().cloned().collect(),
        },
    }
}

/// Resolves within an already-chosen account.
///
/// Returns `None` when the account does not exist (it may have been deleted
/// between the selection prompt and the button press).
pub fn resolve_account(book: &AccountBook, account_name: &str) -> Option<Destination> {
    let account = book.accounts.get(account_name)?;

    Some(match account.sole_folder() {
        Some(folder_id) => Destination::Resolved {
            account: account_name.to_string(),
            cookie: account.cookie.clone(),
            folder_id: folder_id.to_string(),
        },
        None => Destination::SelectFolder {
            account: account_name.to_string(),
            folders: account
                .folders
                .iter()
                .map(|(label, cid)| (label.clone(), cid.clone()))
                .collect(),
        },
    })
}
