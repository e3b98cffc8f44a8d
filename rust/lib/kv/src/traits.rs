use crate::error::KVError;

/// KVStore is a flat key-value store holding one opaque blob per key.
///
/// Keys are short fixed names (`processes`, `orders`, ...). A `set` replaces
/// the whole blob; the store never sees partial values.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Replace the value stored under a key.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;
}
