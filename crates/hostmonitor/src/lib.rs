//! HostMonitor - change-only reachability monitoring
//!
//! This library checks whether a configured set of host and port pairs is
//! reachable, remembers the last observed status of each one and publishes an
//! event only when that status changes.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod events;
pub mod model;
pub mod monitor;
pub mod probe;

// Re-export main types
pub use config::{ConfigStore, HostsMap, MonitorConfig, TomlConfigStore};
pub use connectivity::{resolve_connection_type, ConnectivityQuery, NetworkKind, SysfsConnectivity};
pub use error::MonitorError;
pub use events::{BroadcastSink, EventSink, StatusEvent};
pub use model::{ConnectionType, Host, HostStatusChange, Status};
pub use monitor::{CycleReport, HostMonitor};
pub use probe::{probe_with_retry, HttpProber, Prober};

/// HostMonitor result type
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Default per-attempt socket timeout in milliseconds
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 30_000;

/// Default number of probe attempts per host and cycle
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default channel change events are addressed to
pub const DEFAULT_NOTIFICATION_CHANNEL: &str = "hostmonitor.status";
