use hostmonitor::StatusEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};
use url::Url;

/// Log every status event and deliver it to the webhook, if one is set.
///
/// Runs until every sender of the channel is gone. Delivery failures are
/// logged and never retried.
pub async fn forward_events(mut rx: broadcast::Receiver<StatusEvent>, webhook: Option<Url>) {
    let client = reqwest::Client::new();

    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification forwarder lagged, {} status events dropped", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        info!(channel = %event.channel, "Host status changed: {}", event.change);

        let Some(url) = &webhook else {
            continue;
        };

        let delivery = client
            .post(url.clone())
            .json(&event)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        if let Err(e) = delivery {
            warn!("Failed to deliver status event to {}: {}", url, e);
        }
    }
}
