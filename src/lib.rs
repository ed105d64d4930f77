//! # Pansaver
//!
//! A Telegram bot that saves links from chat messages into a 115 cloud
//! storage account.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link classification, core entities, and
//!   repository traits
//! - **Application Layer** ([`application`]) - Dispatch pipeline, destination
//!   resolution, binding gate, settings, and per-chat sessions
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON account store and
//!   the 115 web-API client
//! - **Bot Layer** ([`bot`]) - Telegram commands, message routing, inline
//!   keyboards
//!
//! ## Features
//!
//! - Classifies 115 share links, plain URLs, magnet and ed2k links in one pass
//! - Share links are transferred into the account, everything else becomes an
//!   offline download task
//! - Multiple accounts and destination folders with inline-keyboard selection
//! - Single-user binding so a public bot stays private
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export BOT_TOKEN="123456:your-telegram-token"
//! export STORE_PATH="accounts.json"  # Optional
//!
//! # Start the bot
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod bot;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{BindingService, DispatchService, SettingsService};
    pub use crate::domain::classifier::classify;
    pub use crate::domain::entities::{ClassifiedLinks, Link, LinkKind, MixedReport};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
