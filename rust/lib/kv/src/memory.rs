use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::error::KVError;
use crate::traits::KVStore;

/// MemoryKV keeps every blob in process memory. Nothing survives the
/// process; used for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryKV {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKV {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KVStore for MemoryKV {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
