//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`classifier`] - Pure link classification over message text
//! - [`repositories`] - Persistence and remote-storage trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or the bot front-end
//! - Classification is pure and deterministic; all I/O lives behind traits
//! - Business orchestration is encapsulated in services
//!   (see [`crate::application::services`])

pub mod classifier;
pub mod entities;
pub mod repositories;
