use crate::ports::{Capabilities, PushPlatform};

pub fn supports_push(capabilities: Capabilities) -> bool {
    capabilities.service_worker && capabilities.push_manager
}

/// Probes the platform once. A missing capability is a degraded mode rather
/// than an error, so it only warns.
pub fn detect<P: PushPlatform>(platform: &P) -> bool {
    let capabilities = platform.capabilities();
    if supports_push(capabilities) {
        tracing::info!("service worker and push are supported");
        true
    } else {
        tracing::warn!(
            service_worker = capabilities.service_worker,
            push_manager = capabilities.push_manager,
            "push messaging is not supported"
        );
        false
    }
}
