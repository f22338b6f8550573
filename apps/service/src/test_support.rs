//! In-memory collaborators for the service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hostmonitor::{
    ConfigStore, ConnectivityQuery, EventSink, Host, HostMonitor, HostStatusChange, HostsMap,
    MonitorConfig, NetworkKind, Prober,
};

#[derive(Debug, Clone, Default)]
pub struct Counters {
    probes: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
    published: Arc<AtomicUsize>,
}

impl Counters {
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> usize {
        self.published.load(Ordering::SeqCst)
    }
}

struct MemoryStore {
    config: Mutex<MonitorConfig>,
    counters: Counters,
}

#[async_trait::async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> hostmonitor::Result<MonitorConfig> {
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save_hosts(&self, hosts: &HostsMap) -> hostmonitor::Result<()> {
        self.counters.saves.fetch_add(1, Ordering::SeqCst);
        self.config.lock().unwrap().hosts = hosts.clone();
        Ok(())
    }

    async fn save(&self, config: &MonitorConfig) -> hostmonitor::Result<()> {
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }
}

struct ReachableProber(Counters);

#[async_trait::async_trait]
impl Prober for ReachableProber {
    async fn probe(&self, _host: &Host, _timeout: Duration) -> bool {
        self.0.probes.fetch_add(1, Ordering::SeqCst);
        true
    }
}

struct CountingSink(Counters);

impl EventSink for CountingSink {
    fn publish(&self, _channel: &str, _change: HostStatusChange) {
        self.0.published.fetch_add(1, Ordering::SeqCst);
    }
}

/// Platform whose active network can be switched during a test
#[derive(Debug, Default)]
pub struct SwitchableConnectivity {
    network: Mutex<Option<NetworkKind>>,
}

impl SwitchableConnectivity {
    pub fn set(&self, network: Option<NetworkKind>) {
        *self.network.lock().unwrap() = network;
    }
}

impl ConnectivityQuery for SwitchableConnectivity {
    fn active_network(&self) -> Option<NetworkKind> {
        self.network.lock().unwrap().clone()
    }
}

/// Monitor over an in-memory store whose hosts always answer
pub fn counting_monitor(counters: &Counters, hosts: &[(&str, u16)]) -> Arc<HostMonitor> {
    let mut config = MonitorConfig::default();
    for (host, port) in hosts {
        config.add_host(*host, *port).unwrap();
    }

    let store = MemoryStore { config: Mutex::new(config), counters: counters.clone() };
    let connectivity = SwitchableConnectivity::default();
    connectivity.set(Some(NetworkKind::Wifi));

    Arc::new(HostMonitor::new(
        Arc::new(store),
        Arc::new(ReachableProber(counters.clone())),
        Arc::new(connectivity),
        Arc::new(CountingSink(counters.clone())),
    ))
}
