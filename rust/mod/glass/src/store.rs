use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vetria_kv::KVStore;

use crate::bff::state::DashboardCounts;
use crate::model::{Collection, Collections, Record};
use crate::seed;

/// GlassStore: the session's five record collections, mirrored to a
/// `KVStore` under one key per collection.
///
/// Every mutation rewrites all five blobs. Storage failures are logged and
/// swallowed; memory stays authoritative for the rest of the session.
pub struct GlassStore {
    kv: Arc<dyn KVStore>,
    data: RwLock<Collections>,
}

impl GlassStore {
    /// Create an unloaded store. Call `initialize` before reading.
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            data: RwLock::new(Collections::default()),
        }
    }

    /// Load every collection from storage. When all five come back empty,
    /// write the demonstration records instead.
    pub fn initialize(&self) {
        let mut loaded = Collections {
            processes: self.load(Collection::Processes),
            materials: self.load(Collection::Materials),
            tasks: self.load(Collection::Tasks),
            orders: self.load(Collection::Orders),
            deliveries: self.load(Collection::Deliveries),
        };

        if loaded.is_empty() {
            info!("GlassStore: no saved records, seeding demo data");
            loaded = seed::demo_collections(Utc::now());
            self.persist(&loaded);
        }

        *self.write() = loaded;
    }

    /// Append a record, then persist.
    pub fn add<T: Record>(&self, record: T) {
        let mut data = self.write();
        debug!("GlassStore: add {} {}", T::COLLECTION.key(), record.id());
        T::collection_mut(&mut data).push(record);
        self.persist(&data);
    }

    /// Remove the record with `id`, then persist. Returns whether anything
    /// was removed.
    pub fn delete<T: Record>(&self, id: Uuid) -> bool {
        let mut data = self.write();
        let items = T::collection_mut(&mut data);
        let removed = match items.iter().position(|r| r.id() == id) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        };
        if !removed {
            debug!("GlassStore: no {} with id {}", T::COLLECTION.key(), id);
        }
        self.persist(&data);
        removed
    }

    /// All records of one kind, in insertion order.
    pub fn records<T: Record>(&self) -> Vec<T> {
        T::collection(&self.read()).clone()
    }

    pub fn snapshot(&self) -> Collections {
        self.read().clone()
    }

    pub fn counts(&self) -> DashboardCounts {
        DashboardCounts::of(&self.read())
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let key = collection.key();
        let bytes = match self.kv.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("GlassStore: read {} failed: {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(items) => {
                debug!("GlassStore: loaded {} {}", items.len(), key);
                items
            }
            Err(e) => {
                warn!("GlassStore: discarding undecodable {}: {}", key, e);
                Vec::new()
            }
        }
    }

    fn persist(&self, all: &Collections) {
        self.save(Collection::Processes, &all.processes);
        self.save(Collection::Materials, &all.materials);
        self.save(Collection::Tasks, &all.tasks);
        self.save(Collection::Orders, &all.orders);
        self.save(Collection::Deliveries, &all.deliveries);
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) {
        let key = collection.key();
        let bytes = match serde_json::to_vec(items) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("GlassStore: encode {} failed: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.kv.set(key, &bytes) {
            warn!("GlassStore: write {} failed: {}", key, e);
        }
    }
}
