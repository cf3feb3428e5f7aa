use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct VapidConfig {
    pub private_key: String,
    pub public_key: String,
    pub subject: String,
}

/// The platform's view of an active push subscription, with raw key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub endpoint: String,
    pub p256dh: Vec<u8>,
    pub auth: Vec<u8>,
}

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub user_visible_only: bool,
    pub application_server_key: Vec<u8>,
}

/// Server-side mirror of a subscription, keyed by endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub endpoint: String,
    pub key: String,
    pub auth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload carried from the server through the push service to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "URI", default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl PushMessage {
    pub fn new(message: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            uri: Some(uri.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationIntent {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn push_message__should_use_capitalised_wire_names() {
        // Given
        let message = PushMessage::new("Pale Ale ready", "/beers/42");

        // When
        let json = serde_json::to_string(&message).expect("serialize");

        // Then
        assert_eq!(json, r#"{"Message":"Pale Ale ready","URI":"/beers/42"}"#);
    }

    #[test]
    fn push_message__should_tolerate_missing_uri() {
        // When
        let message: PushMessage =
            serde_json::from_str(r#"{"Message":"Stout restocked"}"#).expect("parse");

        // Then
        assert_eq!(message.message, "Stout restocked");
        assert!(message.uri.is_none());
    }

    #[test]
    fn permission_state__should_parse_host_strings() {
        let denied: PermissionState = serde_json::from_str(r#""denied""#).expect("parse");
        let granted: PermissionState = serde_json::from_str(r#""granted""#).expect("parse");

        assert_eq!(denied, PermissionState::Denied);
        assert_eq!(granted, PermissionState::Granted);
    }
}
