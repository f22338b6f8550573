//! Resolution of the network attachment a check cycle runs on.

mod sysfs;

pub use sysfs::SysfsConnectivity;

use std::sync::Arc;

use tracing::error;

use crate::model::ConnectionType;

/// Kind of the active network as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkKind {
    Wifi,
    Mobile,
    /// A connected network the monitor has no connection type for
    Other(String),
}

/// Platform capability queried when a trigger does not supply a connection type
pub trait ConnectivityQuery: Send + Sync {
    /// Kind of the active, connected network, or `None` when offline
    fn active_network(&self) -> Option<NetworkKind>;

    /// Map the active network onto a [`ConnectionType`].
    ///
    /// Unrecognized kinds are logged and treated as no connection.
    fn active_connection_type(&self) -> ConnectionType {
        match self.active_network() {
            None => ConnectionType::None,
            Some(NetworkKind::Wifi) => ConnectionType::Wifi,
            Some(NetworkKind::Mobile) => ConnectionType::Mobile,
            Some(NetworkKind::Other(kind)) => {
                error!("Unsupported connection type: {}. Returning NONE", kind);
                ConnectionType::None
            }
        }
    }
}

/// Resolve the connection type on the blocking pool.
///
/// Platform lookups read procfs and sysfs synchronously. A lookup that panics
/// is logged and reported as no connection.
pub async fn resolve_connection_type(query: Arc<dyn ConnectivityQuery>) -> ConnectionType {
    match tokio::task::spawn_blocking(move || query.active_connection_type()).await {
        Ok(connection_type) => connection_type,
        Err(e) => {
            error!("Connectivity lookup failed: {}. Returning NONE", e);
            ConnectionType::None
        }
    }
}
