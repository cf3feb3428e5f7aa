use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::push::SubscriptionRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("subscription store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid subscription store file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize subscriptions: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    subscriptions: Vec<SubscriptionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Remote subscription records, one per endpoint.
///
/// With a path the whole set is rewritten as TOML after every change.
#[derive(Debug, Default)]
pub struct SubscriptionStore {
    path: Option<PathBuf>,
    records: Mutex<BTreeMap<String, SubscriptionRecord>>,
}

impl SubscriptionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let records = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let file: StoreFile = toml::from_str(&contents)?;
                file.subscriptions
                    .into_iter()
                    .map(|record| (record.endpoint.clone(), record))
                    .collect()
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            records: Mutex::new(records),
        })
    }

    pub fn list(&self) -> Vec<SubscriptionRecord> {
        self.records
            .lock()
            .expect("subscription store lock")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, endpoint: &str) -> Option<SubscriptionRecord> {
        self.records
            .lock()
            .expect("subscription store lock")
            .get(endpoint)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("subscription store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or overwrites the record for its endpoint, so rotated keys
    /// replace the old ones instead of piling up. Memory only changes once the
    /// file write succeeded.
    pub fn upsert(&self, record: SubscriptionRecord) -> Result<Upsert, StoreError> {
        let mut records = self.records.lock().expect("subscription store lock");
        let mut next = records.clone();
        let outcome = match next.insert(record.endpoint.clone(), record) {
            Some(_) => Upsert::Updated,
            None => Upsert::Created,
        };
        self.persist(&next)?;
        *records = next;
        Ok(outcome)
    }

    pub fn remove(&self, endpoint: &str) -> Result<Option<SubscriptionRecord>, StoreError> {
        let mut records = self.records.lock().expect("subscription store lock");
        if !records.contains_key(endpoint) {
            return Ok(None);
        }
        let mut next = records.clone();
        let removed = next.remove(endpoint);
        self.persist(&next)?;
        *records = next;
        Ok(removed)
    }

    fn persist(&self, records: &BTreeMap<String, SubscriptionRecord>) -> Result<(), StoreError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let file = StoreFile {
            subscriptions: records.values().cloned().collect(),
        };
        let contents = toml::to_string(&file)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}
