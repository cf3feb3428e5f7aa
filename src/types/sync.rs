use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Subscribe,
    Unsubscribe,
}

impl SyncAction {
    pub fn from_enable(enable: bool) -> Self {
        if enable {
            Self::Subscribe
        } else {
            Self::Unsubscribe
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Subscribe => "/subscribe",
            Self::Unsubscribe => "/unsubscribe",
        }
    }
}

/// Form body shared by `/subscribe` and `/unsubscribe`. Absent fields decode
/// as empty so the handlers can name the missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncForm {
    pub endpoint: String,
    pub key: String,
    pub auth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAck {
    pub status: String,
}
