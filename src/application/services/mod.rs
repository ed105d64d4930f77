//! Business logic services for the application layer.

pub mod binding_service;
pub mod dispatch_service;
pub mod offline_service;
pub mod resolver;
pub mod settings_service;
pub mod transfer_service;

pub use binding_service::{BindResult, BindingService, UnbindResult};
pub use dispatch_service::{DispatchService, NO_LINKS_FOUND};
pub use offline_service::OfflineService;
pub use resolver::{Destination, resolve, resolve_account};
pub use settings_service::SettingsService;
pub use transfer_service::TransferService;
