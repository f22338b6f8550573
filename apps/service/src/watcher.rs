use std::sync::Arc;
use std::time::Duration;

use hostmonitor::{resolve_connection_type, ConnectivityQuery};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::scheduler::SchedulerHandle;

/// Poll the platform and trigger a check whenever the connection type changes.
///
/// Returns once the scheduler stops accepting triggers.
pub async fn watch_connectivity(
    connectivity: Arc<dyn ConnectivityQuery>,
    scheduler: SchedulerHandle,
    poll: Duration,
) {
    let mut last = resolve_connection_type(connectivity.clone()).await;
    debug!(connection_type = %last, "Watching connectivity every {}s", poll.as_secs());

    let mut timer = interval(poll);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    timer.tick().await;

    loop {
        timer.tick().await;

        let current = resolve_connection_type(connectivity.clone()).await;
        if current == last {
            continue;
        }

        info!("Connectivity changed: {} -> {}", last, current);
        last = current;

        if !scheduler.start_check_with(current).await {
            debug!("Scheduler gone, connectivity watcher exiting");
            break;
        }
    }
}
