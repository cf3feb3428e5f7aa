use thiserror::Error;

use crate::config::{ClientConfig, SubscriptionMode};
use crate::encoding::{self, EncodingError};
use crate::ports::{PushPlatform, RemoteSync, TaskSpawner};
use crate::types::push::{PermissionState, PushSubscription, SubscribeOptions};
use crate::types::sync::SyncAction;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("service worker registration failed: {0}")]
    Registration(String),
    #[error("invalid application server key: {0}")]
    ApplicationServerKey(#[from] EncodingError),
    #[error("push platform error: {0}")]
    Platform(String),
}

/// Local belief about the subscription. Never persisted, always reconciled
/// against the platform on initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscriptionState {
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleView {
    pub label: &'static str,
    pub enabled: bool,
}

pub async fn register_worker<P: PushPlatform>(
    platform: &P,
    config: &ClientConfig,
) -> Result<P::Registration, CoordinatorError> {
    platform
        .register_worker(&config.worker_script)
        .await
        .map_err(|err| CoordinatorError::Registration(err.to_string()))
}

pub struct SubscriptionCoordinator<P: PushPlatform, R, S> {
    platform: P,
    remote: R,
    spawner: S,
    config: ClientConfig,
    registration: P::Registration,
    state: SubscriptionState,
}

impl<P, R, S> SubscriptionCoordinator<P, R, S>
where
    P: PushPlatform,
    R: RemoteSync,
    S: TaskSpawner,
{
    pub fn new(
        platform: P,
        remote: R,
        spawner: S,
        config: ClientConfig,
        registration: P::Registration,
    ) -> Self {
        Self {
            platform,
            remote,
            spawner,
            config,
            registration,
            state: SubscriptionState::default(),
        }
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.is_subscribed
    }

    pub fn registration(&self) -> &P::Registration {
        &self.registration
    }

    /// Reconciles local state with the platform. In automatic mode an absent
    /// subscription triggers one subscribe attempt unless permission is denied.
    pub async fn initialize(&mut self) -> bool {
        let subscription = match self.platform.get_subscription(&self.registration).await {
            Ok(subscription) => subscription,
            Err(err) => {
                tracing::error!(error = %err, "failed to query push subscription");
                self.state.is_subscribed = false;
                return false;
            }
        };

        self.state.is_subscribed = subscription.is_some();
        if self.state.is_subscribed {
            tracing::info!("user is subscribed");
            return true;
        }

        tracing::info!("user not subscribed");
        if self.config.mode == SubscriptionMode::Automatic
            && self.platform.permission() != PermissionState::Denied
        {
            self.subscribe_user().await;
        }
        self.state.is_subscribed
    }

    pub async fn subscribe_user(&mut self) -> bool {
        match self.try_subscribe().await {
            Ok(subscription) => {
                self.state.is_subscribed = true;
                tracing::info!(endpoint = %subscription.endpoint, "user subscribed");
                self.sync_subscription(&subscription, true);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to subscribe");
                self.state.is_subscribed = false;
            }
        }
        self.state.is_subscribed
    }

    async fn try_subscribe(&self) -> Result<PushSubscription, CoordinatorError> {
        let application_server_key =
            encoding::url_base64_to_bytes(&self.config.application_server_key)?;
        let options = SubscribeOptions {
            user_visible_only: true,
            application_server_key,
        };
        self.platform
            .subscribe(&self.registration, &options)
            .await
            .map_err(|err| CoordinatorError::Platform(err.to_string()))
    }

    /// Best-effort cleanup: always ends unsubscribed, whatever failed on the way.
    pub async fn unsubscribe_user(&mut self) {
        if let Err(err) = self.try_unsubscribe().await {
            tracing::warn!(error = %err, "error unsubscribing");
        }
        self.state.is_subscribed = false;
        tracing::info!("user is unsubscribed");
    }

    async fn try_unsubscribe(&self) -> Result<(), CoordinatorError> {
        let subscription = self
            .platform
            .get_subscription(&self.registration)
            .await
            .map_err(|err| CoordinatorError::Platform(err.to_string()))?;
        let Some(subscription) = subscription else {
            return Ok(());
        };

        // Issued before the platform call so a dead server cannot hold up the
        // local unsubscribe.
        self.sync_subscription(&subscription, false);

        let removed = self
            .platform
            .unsubscribe(&self.registration, &subscription)
            .await
            .map_err(|err| CoordinatorError::Platform(err.to_string()))?;
        if !removed {
            tracing::debug!(endpoint = %subscription.endpoint, "platform had nothing to unsubscribe");
        }
        Ok(())
    }

    /// Dispatches the remote mirror update without waiting for it. The returned
    /// handle belongs to the spawner; dropping it does not cancel the sync.
    pub fn sync_subscription(&self, subscription: &PushSubscription, enable: bool) -> S::Handle {
        let action = SyncAction::from_enable(enable);
        let form = encoding::sync_form(subscription);
        let endpoint = form.endpoint.clone();
        let request = self.remote.sync(action, form);

        self.spawner.spawn(Box::pin(async move {
            match request.await {
                Ok(ack) => tracing::info!(
                    path = action.path(),
                    status = %ack.status,
                    %endpoint,
                    "subscription synced on server"
                ),
                Err(err) => tracing::warn!(
                    path = action.path(),
                    error = %err,
                    %endpoint,
                    "failed to sync subscription on server"
                ),
            }
        }))
    }

    /// Flips the subscription from an explicit user action.
    pub async fn toggle(&mut self) -> bool {
        if self.state.is_subscribed {
            self.unsubscribe_user().await;
        } else if self.platform.permission() == PermissionState::Denied {
            tracing::warn!("notifications are blocked, not subscribing");
        } else {
            self.subscribe_user().await;
        }
        self.state.is_subscribed
    }

    pub fn toggle_view(&self) -> ToggleView {
        if self.platform.permission() == PermissionState::Denied {
            return ToggleView {
                label: "Push blocked",
                enabled: false,
            };
        }
        let label = if self.state.is_subscribed {
            "Disable push"
        } else {
            "Enable push"
        };
        ToggleView {
            label,
            enabled: true,
        }
    }
}
