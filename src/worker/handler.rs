use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::config::NotificationConfig;
use crate::ports::{NotificationId, WorkerHost};
use crate::types::push::{NotificationIntent, PushMessage};
use crate::worker::context::{CLICK_URL_KEY, WorkerContext};

/// Lifetime extension: the host keeps the worker alive until this resolves.
pub type WaitUntil = Pin<Box<dyn Future<Output = Result<(), WorkerError>> + Send + 'static>>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to show notification: {0}")]
    ShowNotification(String),
    #[error("failed to open window: {0}")]
    OpenWindow(String),
}

#[derive(Debug, Clone, Default)]
pub struct PushEvent {
    pub data: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotificationClickEvent {
    pub notification: NotificationId,
}

pub struct PushDeliveryHandler<H> {
    host: H,
    context: Arc<WorkerContext>,
    config: NotificationConfig,
}

impl<H: WorkerHost> PushDeliveryHandler<H> {
    pub fn new(host: H, context: Arc<WorkerContext>, config: NotificationConfig) -> Self {
        Self {
            host,
            context,
            config,
        }
    }

    pub fn context(&self) -> &Arc<WorkerContext> {
        &self.context
    }

    pub fn on_push(&self, event: PushEvent) -> WaitUntil {
        let text = event.data.unwrap_or_default();
        tracing::debug!(payload = %text, "push had this data");

        // Unreadable payloads are shown as raw text.
        let message = match serde_json::from_str::<PushMessage>(&text) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "push payload is not a push message");
                PushMessage {
                    message: text,
                    uri: None,
                }
            }
        };

        match message.uri.filter(|uri| !uri.trim().is_empty()) {
            Some(uri) => self.context.set(CLICK_URL_KEY, uri),
            None => {
                self.context.remove(CLICK_URL_KEY);
            }
        }

        let shown = self.host.show_notification(self.intent(message.message));
        Box::pin(async move {
            shown
                .await
                .map_err(|err| WorkerError::ShowNotification(err.to_string()))
        })
    }

    pub fn on_notification_click(&self, event: NotificationClickEvent) -> WaitUntil {
        tracing::info!(notification = %event.notification.0, "notification click received");
        self.host.close_notification(&event.notification);

        let url = match self.context.get(CLICK_URL_KEY) {
            Some(url) => url,
            None => {
                tracing::warn!(
                    default_url = %self.config.default_url,
                    "no click target cached, worker was probably recycled"
                );
                self.config.default_url.clone()
            }
        };

        let opened = self.host.open_window(url);
        Box::pin(async move {
            opened
                .await
                .map_err(|err| WorkerError::OpenWindow(err.to_string()))
        })
    }

    fn intent(&self, body: String) -> NotificationIntent {
        NotificationIntent {
            title: self.config.title.clone(),
            body,
            icon: self.config.icon.clone(),
            badge: self.config.badge.clone(),
        }
    }
}
