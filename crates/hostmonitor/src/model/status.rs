use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Host;
use crate::MonitorError;

/// Network attachment in effect while a check cycle runs.
///
/// Serialized by name so stored statuses survive new variants being added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionType {
    /// No active network attachment
    #[default]
    None,
    Wifi,
    Mobile,
}

impl ConnectionType {
    pub fn is_connected(self) -> bool {
        self != ConnectionType::None
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionType::None => write!(f, "NONE"),
            ConnectionType::Wifi => write!(f, "WIFI"),
            ConnectionType::Mobile => write!(f, "MOBILE"),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(ConnectionType::None),
            "WIFI" => Ok(ConnectionType::Wifi),
            "MOBILE" => Ok(ConnectionType::Mobile),
            other => Err(MonitorError::InvalidSetting(format!("unknown connection type: {other}"))),
        }
    }
}

/// Last known or newly observed state of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Status {
    pub reachable: bool,
    pub connection_type: ConnectionType,
}

impl Status {
    pub const fn new(reachable: bool, connection_type: ConnectionType) -> Self {
        Self { reachable, connection_type }
    }

    /// Status assumed for every host while there is no network
    pub const fn offline() -> Self {
        Self::new(false, ConnectionType::None)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.reachable { "reachable" } else { "unreachable" };
        write!(f, "{state} via {}", self.connection_type)
    }
}

/// Payload published when the status of a host changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStatusChange {
    pub host: String,
    pub port: u16,
    pub previous_reachable: bool,
    pub previous_connection_type: ConnectionType,
    pub reachable: bool,
    pub connection_type: ConnectionType,
}

impl HostStatusChange {
    pub fn new(host: &Host, previous: Status, current: Status) -> Self {
        Self {
            host: host.host().to_string(),
            port: host.port(),
            previous_reachable: previous.reachable,
            previous_connection_type: previous.connection_type,
            reachable: current.reachable,
            connection_type: current.connection_type,
        }
    }

    pub fn previous(&self) -> Status {
        Status::new(self.previous_reachable, self.previous_connection_type)
    }

    pub fn current(&self) -> Status {
        Status::new(self.reachable, self.connection_type)
    }
}

impl fmt::Display for HostStatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} -> {}", self.host, self.port, self.previous(), self.current())
    }
}
