pub mod capability;
pub mod coordinator;

pub use coordinator::{
    CoordinatorError, SubscriptionCoordinator, SubscriptionState, ToggleView, register_worker,
};

use crate::config::ClientConfig;
use crate::ports::{PushPlatform, RemoteSync, TaskSpawner};

/// Brings push up for one page load. Returns `None` whenever push is
/// unavailable for this session; the rest of the page keeps working.
pub async fn start<P, R, S>(
    platform: P,
    remote: R,
    spawner: S,
    config: ClientConfig,
) -> Option<SubscriptionCoordinator<P, R, S>>
where
    P: PushPlatform,
    R: RemoteSync,
    S: TaskSpawner,
{
    if !capability::detect(&platform) {
        return None;
    }

    let registration = match register_worker(&platform, &config).await {
        Ok(registration) => registration,
        Err(err) => {
            tracing::error!(error = %err, script = %config.worker_script, "service worker error");
            return None;
        }
    };
    tracing::info!(script = %config.worker_script, "service worker is registered");

    let mut coordinator = SubscriptionCoordinator::new(platform, remote, spawner, config, registration);
    coordinator.initialize().await;
    Some(coordinator)
}
