use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read service config {path}: {1}", path = .0.display())]
    ReadFailed(path::PathBuf, #[source] std::io::Error),
    #[error("Failed to write service config {path}: {1}", path = .0.display())]
    WriteFailed(path::PathBuf, #[source] std::io::Error),
    #[error("Failed to parse service config {path}: {1}", path = .0.display())]
    ParseFailed(path::PathBuf, #[source] toml::de::Error),
    #[error("Failed to serialize service config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("No default location available for the service config")]
    ConfigPathUnavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: Monitor,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub notify: Notify,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    /// Hosts file; the default location is used when unset
    pub state_path: Option<path::PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Seconds between periodic checks, 0 disables them
    pub check_interval_seconds: u64,
    /// Seconds between connectivity polls, 0 disables the watcher
    pub connectivity_poll_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notify {
    /// Every change event is POSTed here as JSON
    pub webhook_url: Option<String>,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/hostmonitor/service.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("hostmonitor/service.toml"))
}

impl Default for Schedule {
    fn default() -> Self {
        Self { check_interval_seconds: 300, connectivity_poll_seconds: 10 }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        let state_path = self
            .monitor
            .state_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "default".to_string());

        writeln!(f, "Current Service Configuration State:")?;
        write_title_1(f, "Monitor")?;
        write_1(f, "State Path", &state_path)?;
        write_title_1(f, "Schedule")?;
        write_1(f, "Check Interval (s)", &self.schedule.check_interval_seconds)?;
        write_1(f, "Connectivity Poll (s)", &self.schedule.connectivity_poll_seconds)?;
        write_title_1(f, "Notify")?;
        write_1(f, "Webhook", &self.notify.webhook_url.as_deref().unwrap_or("none"))?;

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/hostmonitor/service.toml
    ///  or the specified path, with the name service.toml if one does not exist
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|err| Error::ReadFailed(config_path.clone(), err))?;
            toml::from_str(raw_string.as_str()).map_err(|err| Error::ParseFailed(config_path, err))
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &std::path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::WriteFailed(path.to_path_buf(), err))?;
        }

        std::fs::write(path, config_str).map_err(|err| Error::WriteFailed(path.to_path_buf(), err))
    }
}
