use std::time::Duration;

use tracing::debug;
use url::Url;

use super::Prober;
use crate::model::Host;

/// Probes a host by issuing an HTTP GET to its canonical URL.
///
/// Any response whose headers arrive counts as reachable, whatever its status
/// code: a `503` still proves the endpoint answers.
#[derive(Debug, Clone)]
pub struct HttpProber {
    user_agent: String,
}

impl HttpProber {
    pub fn new() -> Self {
        Self { user_agent: format!("hostmonitor/{}", env!("CARGO_PKG_VERSION")) }
    }

    async fn attempt(&self, url: Url, timeout: Duration) -> Result<u16, reqwest::Error> {
        // Built per attempt since the timeout comes from config loaded each cycle
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .user_agent(self.user_agent.as_str())
            .build()?;

        // Success once headers arrive, the body is never read
        let response = client.get(url).send().await?;

        Ok(response.status().as_u16())
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, host: &Host, timeout: Duration) -> bool {
        let url = match host.canonical_url() {
            Ok(url) => url,
            Err(e) => {
                debug!(host = %host, "Cannot build probe URL: {}", e);
                return false;
            }
        };

        match self.attempt(url, timeout).await {
            Ok(status) => {
                debug!(host = %host, status, "Probe succeeded");
                true
            }
            Err(e) => {
                debug!(host = %host, "Probe failed: {}", e);
                false
            }
        }
    }
}
