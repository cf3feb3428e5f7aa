use crate::adapters::WebPushSender;
use crate::config;

pub mod broadcast;
pub mod store;
pub(crate) mod vapid;

pub use broadcast::{BroadcastReport, broadcast};
pub use store::{StoreError, SubscriptionStore, Upsert};
pub(crate) use vapid::{VapidConfigStatus, load_vapid_config};

/// Builds the web-push sender when VAPID is fully configured. Anything less
/// disables delivery without failing startup.
pub fn maybe_sender(config: &config::AppConfig) -> Option<WebPushSender> {
    let vapid = match load_vapid_config(config) {
        VapidConfigStatus::Ready(vapid) => vapid,
        VapidConfigStatus::Incomplete => {
            tracing::warn!("push notifications disabled: incomplete VAPID configuration");
            return None;
        }
        VapidConfigStatus::Invalid(reason) => {
            tracing::warn!(%reason, "push notifications disabled: invalid VAPID configuration");
            return None;
        }
        VapidConfigStatus::Missing => {
            tracing::info!("push notifications disabled: no VAPID configuration");
            return None;
        }
    };

    match WebPushSender::new(vapid, config.push_ttl) {
        Ok(sender) => Some(sender),
        Err(err) => {
            tracing::error!(error = %err, "push notifications disabled: failed to init web-push");
            None
        }
    }
}
