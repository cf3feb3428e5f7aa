use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_APPLICATION_SERVER_KEY: &str = "BHVIXApfzS25EkHw0YvpE9rHK31lL57eEyZlFGDlaca7A8LYF9hsqZh8GyB1MBq1CCx8VzeHbjjj6RN9KYo9jSU";
pub const DEFAULT_OWNER_COOKIE: &str = "syndicate";
pub const DEFAULT_PUSH_TTL_SECONDS: u32 = 20 * 60 * 60;

#[derive(Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub store_path: Option<PathBuf>,
    pub vapid_private_key: Option<String>,
    pub vapid_public_key: Option<String>,
    pub vapid_subject: Option<String>,
    pub owner_cookie: String,
    pub push_ttl: u32,
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store_path: None,
            vapid_private_key: None,
            vapid_public_key: None,
            vapid_subject: None,
            owner_cookie: DEFAULT_OWNER_COOKIE.to_string(),
            push_ttl: DEFAULT_PUSH_TTL_SECONDS,
        }
    }
}

/// How the page decides to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionMode {
    /// Subscribe on load whenever permission has not been denied.
    #[default]
    Automatic,
    /// Only reconcile on load; the user opts in and out through `toggle`.
    Toggle,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub application_server_key: String,
    pub worker_script: String,
    pub mode: SubscriptionMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            application_server_key: DEFAULT_APPLICATION_SERVER_KEY.to_string(),
            worker_script: "/static/sw.js".to_string(),
            mode: SubscriptionMode::Automatic,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub title: String,
    pub icon: String,
    pub badge: String,
    /// Opened on click when the worker lost the URI of the last push.
    pub default_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: "Netops Beer Syndicate".to_string(),
            icon: "/static/beer-icon.png".to_string(),
            badge: "/static/beer-badge.png".to_string(),
            default_url: "/".to_string(),
        }
    }
}
