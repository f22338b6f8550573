use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use hostmonitor::{
    BroadcastSink, ConfigStore, ConnectionType, ConnectivityQuery, CycleReport, Host, HostMonitor,
    HttpProber, MonitorConfig, SysfsConnectivity,
};
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::notify::forward_events;
use crate::scheduler::MonitorScheduler;
use crate::watcher::watch_connectivity;

fn webhook_url(config: &Config) -> Result<Option<Url>> {
    config
        .notify
        .webhook_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid webhook URL in service config")
}

/// Schedule checks until Ctrl-C is received
pub async fn run(config: &Config, store: Arc<dyn ConfigStore>) -> Result<()> {
    let connectivity: Arc<dyn ConnectivityQuery> = Arc::new(SysfsConnectivity::new());
    let sink = Arc::new(BroadcastSink::default());
    let forwarder = tokio::spawn(forward_events(sink.subscribe(), webhook_url(config)?));

    let monitor = Arc::new(HostMonitor::new(
        store,
        Arc::new(HttpProber::new()),
        connectivity.clone(),
        sink.clone(),
    ));
    drop(sink);

    let schedule = &config.schedule;
    let period = (schedule.check_interval_seconds > 0)
        .then(|| Duration::from_secs(schedule.check_interval_seconds));
    let (scheduler, scheduler_task) = MonitorScheduler::new(monitor, period).spawn();

    let watcher = (schedule.connectivity_poll_seconds > 0).then(|| {
        tokio::spawn(watch_connectivity(
            connectivity,
            scheduler.clone(),
            Duration::from_secs(schedule.connectivity_poll_seconds),
        ))
    });

    tokio::signal::ctrl_c().await.context("Failed to listen for the shutdown signal")?;
    info!("Shutting down, waiting for the current check to finish");

    if let Some(watcher) = watcher {
        watcher.abort();
    }
    scheduler.stop().await;
    scheduler_task.await.context("Scheduler task panicked")?;
    // Drains the remaining events now that the monitor is gone
    forwarder.await.context("Notification forwarder panicked")?;

    Ok(())
}

/// Run one cycle and wait until its events are delivered
pub async fn check(
    config: &Config,
    store: Arc<dyn ConfigStore>,
    connection_type: Option<ConnectionType>,
) -> Result<CycleReport> {
    let sink = Arc::new(BroadcastSink::default());
    let forwarder = tokio::spawn(forward_events(sink.subscribe(), webhook_url(config)?));

    let monitor = HostMonitor::new(
        store,
        Arc::new(HttpProber::new()),
        Arc::new(SysfsConnectivity::new()),
        sink,
    );

    let report = match connection_type {
        Some(connection_type) => monitor.check_with(connection_type).await,
        None => monitor.check().await,
    }
    .context("Check cycle failed")?;

    drop(monitor);
    forwarder.await.context("Notification forwarder panicked")?;

    Ok(report)
}

/// Returns false when the host was already monitored
pub async fn add(store: &dyn ConfigStore, host: &str, port: u16) -> Result<bool> {
    let mut config = store.load().await?;
    let added = config.add_host(host, port)?;
    if added {
        store.save(&config).await?;
    }
    Ok(added)
}

/// Returns false when the host was not monitored
pub async fn remove(store: &dyn ConfigStore, host: &str, port: u16) -> Result<bool> {
    let host = Host::new(host, port)?;
    let mut config = store.load().await?;
    let removed = config.remove_host(&host);
    if removed {
        store.save(&config).await?;
    }
    Ok(removed)
}

/// Returns how many hosts were dropped
pub async fn clear(store: &dyn ConfigStore) -> Result<usize> {
    let mut config = store.load().await?;
    let count = config.hosts.len();
    config.remove_all_hosts();
    store.save(&config).await?;
    Ok(count)
}

pub async fn list(store: &dyn ConfigStore) -> Result<String> {
    let config = store.load().await?;
    Ok(render_hosts(&config))
}

fn render_hosts(config: &MonitorConfig) -> String {
    if config.hosts.is_empty() {
        return "No hosts are monitored\n".to_string();
    }

    let mut out = String::new();
    for (host, status) in &config.hosts {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{:<40} {}", host.to_string(), status);
    }
    out
}

pub fn render_report(report: &CycleReport) -> String {
    let Some(connection_type) = report.connection_type else {
        return "No hosts to check\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Checked {} host(s) via {}, {} change(s)",
        report.hosts_checked,
        connection_type,
        report.changes.len()
    );
    for change in &report.changes {
        let _ = writeln!(out, "  {change}");
    }
    out
}
