//! In-memory collaborators recording how the monitor uses them.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hostmonitor::{
    ConfigStore, ConnectivityQuery, EventSink, Host, HostMonitor, HostStatusChange, HostsMap,
    MonitorConfig, MonitorError, NetworkKind, Prober, StatusEvent,
};

#[derive(Default)]
pub struct MemoryStore {
    pub config: Mutex<MonitorConfig>,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_save: bool,
}

impl MemoryStore {
    pub fn with_config(config: MonitorConfig) -> Self {
        Self { config: Mutex::new(config), ..Default::default() }
    }

    pub fn hosts(&self) -> HostsMap {
        self.config.lock().unwrap().hosts.clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> hostmonitor::Result<MonitorConfig> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save_hosts(&self, hosts: &HostsMap) -> hostmonitor::Result<()> {
        if self.fail_save {
            return Err(MonitorError::WriteFailed {
                path: "memory".into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.config.lock().unwrap().hosts = hosts.clone();
        Ok(())
    }

    async fn save(&self, config: &MonitorConfig) -> hostmonitor::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }
}

/// Replays scripted outcomes per host, falling back to a fixed answer
#[derive(Default)]
pub struct ScriptedProber {
    pub fallback: bool,
    pub scripts: Mutex<HashMap<Host, VecDeque<bool>>>,
    pub calls: Mutex<Vec<Host>>,
    pub delay: Option<Duration>,
}

impl ScriptedProber {
    pub fn always(reachable: bool) -> Self {
        Self { fallback: reachable, ..Default::default() }
    }

    pub fn script(self, host: &Host, outcomes: &[bool]) -> Self {
        self.scripts.lock().unwrap().insert(host.clone(), outcomes.iter().copied().collect());
        self
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, host: &Host) -> usize {
        self.calls.lock().unwrap().iter().filter(|called| *called == host).count()
    }
}

#[async_trait::async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, host: &Host, _timeout: Duration) -> bool {
        self.calls.lock().unwrap().push(host.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.scripts
            .lock()
            .unwrap()
            .get_mut(host)
            .and_then(|outcomes| outcomes.pop_front())
            .unwrap_or(self.fallback)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<StatusEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, channel: &str, change: HostStatusChange) {
        self.events
            .lock()
            .unwrap()
            .push(StatusEvent { channel: channel.to_string(), change });
    }
}

#[derive(Default)]
pub struct FakeConnectivity {
    pub network: Mutex<Option<NetworkKind>>,
    pub queries: AtomicUsize,
}

impl FakeConnectivity {
    pub fn new(network: Option<NetworkKind>) -> Self {
        Self { network: Mutex::new(network), queries: AtomicUsize::new(0) }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ConnectivityQuery for FakeConnectivity {
    fn active_network(&self) -> Option<NetworkKind> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.network.lock().unwrap().clone()
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub prober: Arc<ScriptedProber>,
    pub connectivity: Arc<FakeConnectivity>,
    pub sink: Arc<RecordingSink>,
    pub monitor: HostMonitor,
}

impl Harness {
    pub fn new(store: MemoryStore, prober: ScriptedProber, connectivity: FakeConnectivity) -> Self {
        let store = Arc::new(store);
        let prober = Arc::new(prober);
        let connectivity = Arc::new(connectivity);
        let sink = Arc::new(RecordingSink::default());

        let monitor = HostMonitor::new(
            store.clone(),
            prober.clone(),
            connectivity.clone(),
            sink.clone(),
        );

        Self { store, prober, connectivity, sink, monitor }
    }
}

pub fn host(name: &str, port: u16) -> Host {
    Host::new(name, port).unwrap()
}
