use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::{MonitorError, Result};

/// A monitored endpoint: a host name (or URL) and a port.
///
/// Two hosts are equal when both the host string and the port are equal, so
/// the same name on two ports is monitored as two independent endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Host {
    host: String,
    port: u16,
}

impl Host {
    /// Create a host, rejecting empty names and port 0
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into().trim().to_string();

        if host.is_empty() {
            return Err(MonitorError::InvalidHost("host name is empty".to_string()));
        }

        if port == 0 {
            return Err(MonitorError::InvalidHost(format!("{host}: port 0 is not valid")));
        }

        Ok(Self { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The URL a probe connects to.
    ///
    /// A host without a scheme is probed over plain `http`. The configured
    /// port always replaces any port embedded in the host string.
    pub fn canonical_url(&self) -> Result<Url> {
        let raw = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("http://{}", self.host)
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| MonitorError::InvalidHost(format!("{}: {e}", self.host)))?;

        url.set_port(Some(self.port))
            .map_err(|()| MonitorError::InvalidHost(format!("{}: cannot carry a port", self.host)))?;

        Ok(url)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parses `host:port`, splitting on the last colon so URLs with a scheme work.
impl FromStr for Host {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| MonitorError::InvalidHost(format!("{s}: expected host:port")))?;

        let port: u16 = port
            .parse()
            .map_err(|_| MonitorError::InvalidHost(format!("{s}: invalid port number")))?;

        Self::new(host, port)
    }
}
