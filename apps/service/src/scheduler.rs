use std::sync::Arc;
use std::time::Duration;

use hostmonitor::{ConnectionType, CycleReport, HostMonitor};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Request understood by the scheduler task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Check(Option<ConnectionType>),
    Stop,
}

/// Cloneable trigger interface of a running scheduler
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    tx: mpsc::Sender<Trigger>,
}

impl SchedulerHandle {
    /// Queue a check on the live connection type, false once stopped
    pub async fn start_check(&self) -> bool {
        self.send(Trigger::Check(None)).await
    }

    /// Queue a check on a connection type the caller already observed
    pub async fn start_check_with(&self, connection_type: ConnectionType) -> bool {
        self.send(Trigger::Check(Some(connection_type))).await
    }

    /// Stop triggering cycles. A cycle already running is finished first.
    pub async fn stop(&self) {
        self.send(Trigger::Stop).await;
    }

    async fn send(&self, trigger: Trigger) -> bool {
        if self.tx.send(trigger).await.is_err() {
            debug!(?trigger, "Scheduler already stopped");
            return false;
        }
        true
    }
}

/// Monitoring scheduler - serializes periodic and on-demand check cycles
pub struct MonitorScheduler {
    monitor: Arc<HostMonitor>,
    period: Option<Duration>,
}

impl MonitorScheduler {
    /// `period` of `None` only runs cycles when triggered
    pub fn new(monitor: Arc<HostMonitor>, period: Option<Duration>) -> Self {
        Self { monitor, period }
    }

    pub fn spawn(self) -> (SchedulerHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(self.run(rx));
        (SchedulerHandle { tx }, handle)
    }

    async fn run(self, mut rx: mpsc::Receiver<Trigger>) {
        let mut timer = self.period.map(|period| {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });

        match self.period {
            Some(period) => info!("Checking hosts every {}s", period.as_secs()),
            None => info!("Periodic checks disabled, waiting for triggers"),
        }

        loop {
            let trigger = match timer.as_mut() {
                Some(timer) => tokio::select! {
                    _ = timer.tick() => Trigger::Check(None),
                    trigger = rx.recv() => trigger.unwrap_or(Trigger::Stop),
                },
                None => rx.recv().await.unwrap_or(Trigger::Stop),
            };

            match trigger {
                Trigger::Check(connection_type) => self.run_cycle(connection_type).await,
                Trigger::Stop => {
                    info!("Scheduler stopped");
                    break;
                }
            }
        }
    }

    async fn run_cycle(&self, connection_type: Option<ConnectionType>) {
        let result = match connection_type {
            Some(connection_type) => self.monitor.check_with(connection_type).await,
            None => self.monitor.check().await,
        };

        match result {
            Ok(report) => log_report(&report),
            // The next trigger starts over from the stored state
            Err(e) => error!("Check cycle failed: {}", e),
        }
    }
}

fn log_report(report: &CycleReport) {
    let Some(connection_type) = report.connection_type else {
        return;
    };

    if report.changes.is_empty() {
        debug!(hosts = report.hosts_checked, %connection_type, "No host status changed");
    } else {
        info!(
            hosts = report.hosts_checked,
            changes = report.changes.len(),
            %connection_type,
            "Check cycle finished"
        );
    }
}
