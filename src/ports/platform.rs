use std::future::Future;
use std::pin::Pin;

use crate::types::push::{PermissionState, PushSubscription, SubscribeOptions};

pub type PlatformFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// What the page context can do, as probed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub service_worker: bool,
    pub push_manager: bool,
}

/// The page-side push platform: worker registration and the push manager.
pub trait PushPlatform: Clone + Send + Sync + 'static {
    type Registration: Clone + Send + Sync + 'static;
    type Error: std::fmt::Display + Send + Sync + 'static;

    fn capabilities(&self) -> Capabilities;
    fn permission(&self) -> PermissionState;

    fn register_worker<'a>(
        &'a self,
        script_url: &'a str,
    ) -> PlatformFuture<'a, Self::Registration, Self::Error>;

    fn get_subscription<'a>(
        &'a self,
        registration: &'a Self::Registration,
    ) -> PlatformFuture<'a, Option<PushSubscription>, Self::Error>;

    fn subscribe<'a>(
        &'a self,
        registration: &'a Self::Registration,
        options: &'a SubscribeOptions,
    ) -> PlatformFuture<'a, PushSubscription, Self::Error>;

    /// Resolves to whether the platform actually dropped a subscription.
    fn unsubscribe<'a>(
        &'a self,
        registration: &'a Self::Registration,
        subscription: &'a PushSubscription,
    ) -> PlatformFuture<'a, bool, Self::Error>;
}
