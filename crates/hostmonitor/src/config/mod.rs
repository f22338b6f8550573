//! Monitor configuration and its durable storage.
//!
//! The configuration is loaded fresh at the start of every check cycle so edits
//! made between cycles take effect immediately.

mod methods;
mod store;
mod types;

pub use store::{ConfigStore, TomlConfigStore};
pub use types::{HostsMap, MonitorConfig};
