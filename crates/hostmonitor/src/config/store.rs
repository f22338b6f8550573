use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use super::types::{HostsMap, MonitorConfig};
use crate::model::{ConnectionType, Host, Status};
use crate::{
    MonitorError, Result, DEFAULT_MAX_ATTEMPTS, DEFAULT_NOTIFICATION_CHANNEL,
    DEFAULT_SOCKET_TIMEOUT_MS,
};

/// Durable storage of the monitor configuration
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the whole configuration. An empty host map is a valid result.
    async fn load(&self) -> Result<MonitorConfig>;

    /// Replace the stored hosts and statuses, keeping the other settings
    async fn save_hosts(&self, hosts: &HostsMap) -> Result<()>;

    /// Replace the whole stored configuration
    async fn save(&self, config: &MonitorConfig) -> Result<()>;
}

/// On-disk layout of the monitor configuration
#[derive(Debug, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default = "default_socket_timeout_ms")]
    socket_timeout_ms: u64,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    #[serde(default = "default_notification_channel")]
    notification_channel: String,
    #[serde(default)]
    hosts: Vec<StoredHost>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredHost {
    host: String,
    port: u16,
    #[serde(default)]
    reachable: bool,
    #[serde(default)]
    connection_type: ConnectionType,
}

fn default_socket_timeout_ms() -> u64 {
    DEFAULT_SOCKET_TIMEOUT_MS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_notification_channel() -> String {
    DEFAULT_NOTIFICATION_CHANNEL.to_string()
}

fn stored_hosts(hosts: &HostsMap) -> Vec<StoredHost> {
    hosts
        .iter()
        .map(|(host, status)| StoredHost {
            host: host.host().to_string(),
            port: host.port(),
            reachable: status.reachable,
            connection_type: status.connection_type,
        })
        .collect()
}

impl From<&MonitorConfig> for StoredConfig {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            socket_timeout_ms: config.socket_timeout_ms,
            max_attempts: config.max_attempts,
            notification_channel: config.notification_channel.clone(),
            hosts: stored_hosts(&config.hosts),
        }
    }
}

impl TryFrom<StoredConfig> for MonitorConfig {
    type Error = MonitorError;

    fn try_from(stored: StoredConfig) -> Result<Self> {
        let mut config = MonitorConfig::default();
        config.set_socket_timeout_ms(stored.socket_timeout_ms)?;
        config.set_max_attempts(stored.max_attempts)?;
        config.set_notification_channel(stored.notification_channel)?;

        for entry in stored.hosts {
            let host = Host::new(entry.host, entry.port)?;
            config.hosts.insert(host, Status::new(entry.reachable, entry.connection_type));
        }

        Ok(config)
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// [`ConfigStore`] keeping the configuration in a TOML file
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: normalize_toml_path(path.as_ref()) }
    }

    /// Store at the default location ($XDG_CONFIG_HOME/hostmonitor/hosts.toml
    /// or $HOME/.config/...)
    pub fn at_default_path() -> Result<Self> {
        let base = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
            PathBuf::from(config_home)
        } else if let Some(home_dir) = env::home_dir() {
            home_dir.join(".config")
        } else {
            return Err(MonitorError::ConfigPathUnavailable);
        };

        Ok(Self::new(base.join("hostmonitor/hosts.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<StoredConfig>> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| MonitorError::ReadFailed { path: self.path.clone(), source })?;
        if !exists {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| MonitorError::ReadFailed { path: self.path.clone(), source })?;

        toml::from_str(&raw)
            .map(Some)
            .map_err(|source| MonitorError::ParseFailed { path: self.path.clone(), source })
    }

    /// Serialize and replace the file through a sibling temp file
    async fn write(&self, stored: &StoredConfig) -> Result<()> {
        let contents = toml::to_string_pretty(stored)?;
        let write_failed = |source| MonitorError::WriteFailed { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, contents).await.map_err(write_failed)?;
        fs::rename(&tmp_path, &self.path).await.map_err(write_failed)?;

        debug!(path = %self.path.display(), hosts = stored.hosts.len(), "Monitor config saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ConfigStore for TomlConfigStore {
    async fn load(&self) -> Result<MonitorConfig> {
        match self.read().await? {
            Some(stored) => MonitorConfig::try_from(stored),
            None => {
                info!(path = %self.path.display(), "Creating default monitor config");
                let config = MonitorConfig::default();
                self.save(&config).await?;
                Ok(config)
            }
        }
    }

    async fn save_hosts(&self, hosts: &HostsMap) -> Result<()> {
        let mut stored =
            self.read().await?.unwrap_or_else(|| StoredConfig::from(&MonitorConfig::default()));
        stored.hosts = stored_hosts(hosts);
        self.write(&stored).await
    }

    async fn save(&self, config: &MonitorConfig) -> Result<()> {
        self.write(&StoredConfig::from(config)).await
    }
}
