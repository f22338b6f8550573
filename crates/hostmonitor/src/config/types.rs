use std::collections::BTreeMap;
use std::time::Duration;

use crate::model::{Host, Status};
use crate::{DEFAULT_MAX_ATTEMPTS, DEFAULT_NOTIFICATION_CHANNEL, DEFAULT_SOCKET_TIMEOUT_MS};

/// Monitored hosts with their last known status, ordered by host then port
pub type HostsMap = BTreeMap<Host, Status>;

/// Everything a check cycle needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Monitored hosts and the status observed during the last cycle
    pub hosts: HostsMap,

    /// Connect and read timeout of a single probe attempt
    pub socket_timeout_ms: u64,

    /// Probe attempts per host before it is considered unreachable
    pub max_attempts: u32,

    /// Identifier change events are addressed to
    pub notification_channel: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            hosts: HostsMap::new(),
            socket_timeout_ms: DEFAULT_SOCKET_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            notification_channel: DEFAULT_NOTIFICATION_CHANNEL.to_string(),
        }
    }
}

impl MonitorConfig {
    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }
}
