use serde::Serialize;

use crate::ports::PushSender;
use crate::push::store::SubscriptionStore;
use crate::types::push::PushMessage;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    pub sent: usize,
    pub skipped: usize,
    pub expired: usize,
    pub failed: usize,
}

/// Sends `message` to every stored subscription except those owned by
/// `exclude_owner`. Subscriptions the push service reports as gone are dropped
/// from the store.
pub async fn broadcast<S: PushSender>(
    store: &SubscriptionStore,
    sender: &S,
    message: &PushMessage,
    exclude_owner: Option<&str>,
) -> Result<BroadcastReport, serde_json::Error> {
    let payload = serde_json::to_string(message)?;
    let mut report = BroadcastReport::default();

    for subscription in store.list() {
        if exclude_owner.is_some() && subscription.owner.as_deref() == exclude_owner {
            report.skipped += 1;
            continue;
        }

        tracing::debug!(endpoint = %subscription.endpoint, "sending push");
        match sender.send(&subscription, &payload).await {
            Ok(()) => report.sent += 1,
            Err(err) if sender.is_expired(&err) => {
                tracing::info!(endpoint = %subscription.endpoint, error = %err, "subscription gone");
                report.expired += 1;
                if let Err(err) = store.remove(&subscription.endpoint) {
                    tracing::error!(
                        endpoint = %subscription.endpoint,
                        error = %err,
                        "failed to remove expired subscription"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(endpoint = %subscription.endpoint, error = %err, "push delivery error");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
