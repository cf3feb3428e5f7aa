use std::future::Future;
use std::pin::Pin;

use crate::types::push::NotificationIntent;

pub type HostFuture<E> = Pin<Box<dyn Future<Output = Result<(), E>> + Send + 'static>>;

/// Identifies a displayed notification so a click can close it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(pub String);

/// The worker-side host: the registration's notification API and the
/// clients API.
pub trait WorkerHost: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;

    fn show_notification(&self, intent: NotificationIntent) -> HostFuture<Self::Error>;
    fn close_notification(&self, id: &NotificationId);
    fn open_window(&self, url: String) -> HostFuture<Self::Error>;
}
