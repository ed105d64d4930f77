//! Application layer: orchestration over the domain traits.

pub mod services;
pub mod sessions;
