use crate::adapters::WebPushSender;
use crate::config::AppConfig;
use crate::push::SubscriptionStore;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<SubscriptionStore>,
    pub sender: Option<WebPushSender>,
}
