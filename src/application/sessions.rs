//! Per-conversation transient state.
//!
//! Each chat owns at most one [`SessionState`] value: either a parked message
//! waiting for a destination choice, or a step of the settings wizard. The
//! state is an explicit finite-state machine rather than a loose scratch map,
//! so every transition is visible in the type.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::MessageEntity;

/// A message parked while the user picks a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub text: String,
    pub entities: Vec<MessageEntity>,
}

/// Steps of the add-account / add-folder wizard, each carrying what has been
/// collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    AccountName,
    AccountCookie {
        name: String,
    },
    AccountFolderLabel {
        name: String,
        cookie: String,
    },
    AccountFolderId {
        name: String,
        cookie: String,
        label: String,
    },
    FolderLabel {
        account: String,
    },
    FolderId {
        account: String,
        label: String,
    },
    NewCookie {
        account: String,
    },
}

/// The full per-chat state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the user to pick an account (or then a folder) for the
    /// parked message.
    AwaitingDestination { pending: PendingMessage },
    /// Inside the settings wizard.
    Wizard(WizardStep),
}

/// In-memory session map keyed by chat id.
///
/// Exclusively owned per conversation; no state is shared across chats.
/// Sessions do not survive a restart, matching the "abandon in-flight work on
/// termination" model.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<i64, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the chat's session state.
    pub fn set(&self, chat_id: i64, state: SessionState) {
        self.inner.lock().unwrap().insert(chat_id, state);
    }

    /// Returns a copy of the chat's current state, if any.
    pub fn get(&self, chat_id: i64) -> Option<SessionState> {
        self.inner.lock().unwrap().get(&chat_id).cloned()
    }

    /// Removes and returns the chat's state.
    pub fn take(&self, chat_id: i64) -> Option<SessionState> {
        self.inner.lock().unwrap().remove(&chat_id)
    }

    /// Drops the chat's state, if any.
    pub fn clear(&self, chat_id: i64) {
        self.inner.lock().unwrap().remove(&chat_id);
    }

    /// Takes the parked message if the chat is awaiting a destination choice.
    ///
    /// Any other state is left untouched.
    pub fn take_pending(&self, chat_id: i64) -> Option<PendingMessage> {
        let mut inner = self.inner.lock().unwrap();
        match inner.get(&chat_id) {
            Some(SessionState::AwaitingDestination { .. }) => {
                let Some(SessionState::AwaitingDestination { pending }) = inner.remove(&chat_id)
                else {
                    unreachable!("checked variant above");
                };
                Some(pending)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(text: &str) -> PendingMessage {
        PendingMessage {
            text: text.to_string(),
            entities: Vec::new(),
        }
    }

    #[test]
    fn test_sessions_are_per_chat() {
        let store = SessionStore::new();
        store.set(
            1,
            SessionState::AwaitingDestination {
                pending: pending("a"),
            },
        );
        store.set(2, SessionState::Wizard(WizardStep::AccountName));

        assert!(matches!(
            store.get(1),
            Some(SessionState::AwaitingDestination { .. })
        ));
        assert!(matches!(store.get(2), Some(SessionState::Wizard(_))));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn test_take_pending_consumes_state() {
        let store = SessionStore::new();
        store.set(
            1,
            SessionState::AwaitingDestination {
                pending: pending("magnet:?xt=a"),
            },
        );

        let taken = store.take_pending(1).unwrap();
        assert_eq!(taken.text, "magnet:?xt=a");
        assert_eq!(store.get(1), None);
    }

    #[test]
    fn test_take_pending_leaves_wizard_alone() {
        let store = SessionStore::new();
        store.set(1, SessionState::Wizard(WizardStep::AccountName));

        assert_eq!(store.take_pending(1), None);
        assert!(matches!(store.get(1), Some(SessionState::Wizard(_))));
    }

    #[test]
    fn test_set_replaces_previous_state() {
        let store = SessionStore::new();
        store.set(1, SessionState::Wizard(WizardStep::AccountName));
        store.set(
            1,
            SessionState::Wizard(WizardStep::AccountCookie {
                name: "main".to_string(),
            }),
        );

        assert!(matches!(
            store.get(1),
            Some(SessionState::Wizard(WizardStep::AccountCookie { .. }))
        ));
    }

    #[test]
    fn test_clear() {
        let store = SessionStore::new();
        store.set(1, SessionState::Wizard(WizardStep::AccountName));
        store.clear(1);
        assert_eq!(store.get(1), None);
    }
}
