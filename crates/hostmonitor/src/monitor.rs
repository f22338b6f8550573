//! Check cycle orchestration.
//!
//! A cycle loads the configuration, resolves the connection type, determines
//! the current status of every host, publishes the statuses that changed and
//! persists the map once at the end.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ConfigStore;
use crate::connectivity::{resolve_connection_type, ConnectivityQuery};
use crate::events::EventSink;
use crate::model::{ConnectionType, HostStatusChange, Status};
use crate::probe::{probe_with_retry, Prober};
use crate::Result;

/// Outcome of a single check cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Connection type the hosts were checked on, `None` if nothing was checked
    pub connection_type: Option<ConnectionType>,

    /// Number of hosts whose status was determined
    pub hosts_checked: usize,

    /// Changes published during the cycle, in host order
    pub changes: Vec<HostStatusChange>,
}

impl CycleReport {
    pub fn is_skipped(&self) -> bool {
        self.connection_type.is_none()
    }
}

/// Runs check cycles against injected collaborators.
///
/// Cycles never overlap: a cycle started while another one is in flight waits
/// for it to finish and then works on freshly loaded configuration.
pub struct HostMonitor {
    store: Arc<dyn ConfigStore>,
    prober: Arc<dyn Prober>,
    connectivity: Arc<dyn ConnectivityQuery>,
    sink: Arc<dyn EventSink>,
    cycle_lock: Mutex<()>,
}

impl HostMonitor {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        prober: Arc<dyn Prober>,
        connectivity: Arc<dyn ConnectivityQuery>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self { store, prober, connectivity, sink, cycle_lock: Mutex::new(()) }
    }

    /// Run a cycle on the connection type reported by the platform
    pub async fn check(&self) -> Result<CycleReport> {
        self.run_cycle(None).await
    }

    /// Run a cycle on a connection type the caller already knows
    pub async fn check_with(&self, connection_type: ConnectionType) -> Result<CycleReport> {
        self.run_cycle(Some(connection_type)).await
    }

    async fn run_cycle(&self, requested: Option<ConnectionType>) -> Result<CycleReport> {
        let _cycle = self.cycle_lock.lock().await;

        let mut config = self.store.load().await?;

        if config.hosts.is_empty() {
            debug!("No hosts to check at this moment");
            return Ok(CycleReport::default());
        }

        let connection_type = match requested {
            Some(connection_type) => connection_type,
            None => resolve_connection_type(self.connectivity.clone()).await,
        };

        if connection_type.is_connected() {
            debug!(%connection_type, hosts = config.hosts.len(), "Starting reachability check");
        } else {
            debug!("No active connection. Notifying that all the hosts are unreachable");
        }

        let timeout = config.socket_timeout();
        let max_attempts = config.max_attempts;
        let mut changes = Vec::new();

        for (host, stored) in config.hosts.iter_mut() {
            // Never touch the network while the platform reports none
            let current = if connection_type.is_connected() {
                let reachable =
                    probe_with_retry(self.prober.as_ref(), host, timeout, max_attempts).await;
                Status::new(reachable, connection_type)
            } else {
                Status::offline()
            };

            if current == *stored {
                continue;
            }

            debug!(
                "Host {} is currently {} on port {} via {}",
                host.host(),
                if current.reachable { "reachable" } else { "unreachable" },
                host.port(),
                connection_type
            );

            let change = HostStatusChange::new(host, *stored, current);
            *stored = current;
            self.sink.publish(&config.notification_channel, change.clone());
            changes.push(change);
        }

        self.store.save_hosts(&config.hosts).await?;
        debug!(changes = changes.len(), "Reachability check finished!");

        Ok(CycleReport {
            connection_type: Some(connection_type),
            hosts_checked: config.hosts.len(),
            changes,
        })
    }
}
