use std::future::Future;
use std::pin::Pin;

pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs detached work, such as remote syncs the caller never waits for.
pub trait TaskSpawner: Clone + Send + Sync + 'static {
    type Handle: Send + 'static;

    fn spawn(&self, task: BackgroundTask) -> Self::Handle;
}
