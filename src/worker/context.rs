use std::collections::HashMap;
use std::sync::Mutex;

pub const CLICK_URL_KEY: &str = "click_url";

/// Key-value state that lives exactly as long as one worker instance.
///
/// Nothing here survives a recycle, so every read has to cope with `None`.
#[derive(Debug, Default)]
pub struct WorkerContext {
    values: Mutex<HashMap<String, String>>,
}

impl WorkerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("worker context lock")
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.values
            .lock()
            .expect("worker context lock")
            .insert(key.to_string(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("worker context lock")
            .remove(key)
    }

    /// The host suspended and restarted the worker.
    pub fn recycle(&self) {
        self.values.lock().expect("worker context lock").clear();
    }
}
