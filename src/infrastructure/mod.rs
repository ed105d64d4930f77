//! Infrastructure layer: concrete implementations of the domain traits.

pub mod persistence;
pub mod storage;
