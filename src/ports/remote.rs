use std::future::Future;

use crate::types::sync::{SyncAck, SyncAction, SyncForm};

/// Mirrors subscription changes to the remote endpoint.
///
/// The request is built when `sync` is called; the returned future performs the
/// exchange and resolves to the acknowledgment, so it can be handed straight to
/// a spawner.
pub trait RemoteSync: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type Fut: Future<Output = Result<SyncAck, Self::Error>> + Send + 'static;

    fn sync(&self, action: SyncAction, form: SyncForm) -> Self::Fut;
}
