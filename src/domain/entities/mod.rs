//! Core business data structures.

pub mod account;
pub mod classified;
pub mod link;
pub mod message;
pub mod report;

pub use account::{Account, AccountBook};
pub use classified::ClassifiedLinks;
pub use link::{Link, LinkKind};
pub use message::MessageEntity;
pub use report::{CategoryReport, MixedReport, OperationOutcome};
