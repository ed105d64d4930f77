//! Single-user binding gate.

use std::sync::Arc;

use crate::domain::repositories::AccountStore;
use crate::error::AppError;

/// Result of a bind attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindResult {
    /// The caller is now the bound user.
    Bound,
    /// Someone is already bound; binding again is refused.
    AlreadyBound,
    /// The requested id does not match the caller's own id.
    IdMismatch,
}

/// Result of an unbind attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnbindResult {
    Unbound,
    NotBound,
}

/// Authorization gate binding the bot to at most one user.
///
/// While unbound, anyone may operate the bot (and claim the binding); once
/// bound, only the bound user passes [`Self::permits`].
pub struct BindingService<A: AccountStore> {
    store: Arc<A>,
}

impl<A: AccountStore> BindingService<A> {
    pub fn new(store: Arc<A>) -> Self {
        Self { store }
    }

    /// True when `user_id` may operate the bot at all.
    pub async fn permits(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(self.store.load().await?.permits(user_id))
    }

    /// True when `user_id` is the currently bound user.
    pub async fn is_bound_to(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(self.store.load().await?.is_bound_to(user_id))
    }

    /// Binds the bot to the caller.
    ///
    /// The caller must pass their own id as `requested_id`; this guards
    /// against typos binding the bot to an unreachable user.
    pub async fn bind(&self, user_id: i64, requested_id: i64) -> Result<BindResult, AppError> {
        let mut book = self.store.load().await?;

        if book.bound_user.is_some() {
            return Ok(BindResult::AlreadyBound);
        }
        if user_id != requested_id {
            return Ok(BindResult::IdMismatch);
        }

        book.bound_user = Some(user_id);
        self.store.save(&book).await?;
        tracing::info!(user_id, "bot bound to user");
        Ok(BindResult::Bound)
    }

    /// Clears the binding. Only meaningful for the bound user; the front-end
    /// gates callers with [`Self::permits`] first.
    pub async fn unbind(&self) -> Result<UnbindResult, AppError> {
        let mut book = self.store.load().await?;

        if book.bound_user.is_none() {
            return Ok(UnbindResult::NotBound);
        }

        book.bound_user = None;
        self.store.save(&book).await?;
        tracing::info!("bot binding cleared");
        Ok(UnbindResult::Unbound)
    }
}
