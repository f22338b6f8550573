//! Editing operations on [`MonitorConfig`].

use super::types::MonitorConfig;
use crate::model::{Host, Status};
use crate::{MonitorError, Result};

impl MonitorConfig {
    /// Start monitoring `host` on `port`.
    ///
    /// A new host starts out unreachable with no connection. Adding a host
    /// that is already monitored keeps its status and returns `false`.
    pub fn add_host(&mut self, host: impl Into<String>, port: u16) -> Result<bool> {
        let host = Host::new(host, port)?;

        if self.hosts.contains_key(&host) {
            return Ok(false);
        }

        self.hosts.insert(host, Status::offline());
        Ok(true)
    }

    /// Stop monitoring a host, returns whether it was monitored
    pub fn remove_host(&mut self, host: &Host) -> bool {
        self.hosts.remove(host).is_some()
    }

    pub fn remove_all_hosts(&mut self) {
        self.hosts.clear();
    }

    /// Restore every setting to its default and forget all hosts
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_socket_timeout_ms(&mut self, timeout_ms: u64) -> Result<()> {
        if timeout_ms == 0 {
            return Err(MonitorError::InvalidSetting(
                "socket timeout must be at least 1 ms".to_string(),
            ));
        }

        self.socket_timeout_ms = timeout_ms;
        Ok(())
    }

    pub fn set_max_attempts(&mut self, max_attempts: u32) -> Result<()> {
        if max_attempts == 0 {
            return Err(MonitorError::InvalidSetting("max attempts must be at least 1".to_string()));
        }

        self.max_attempts = max_attempts;
        Ok(())
    }

    pub fn set_notification_channel(&mut self, channel: impl Into<String>) -> Result<()> {
        let channel = channel.into();

        if channel.trim().is_empty() {
            return Err(MonitorError::InvalidSetting("notification channel is empty".to_string()));
        }

        self.notification_channel = channel;
        Ok(())
    }
}
