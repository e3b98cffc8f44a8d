mod delivery;
mod material;
mod order;
mod process;
mod task;

pub use delivery::*;
pub use material::*;
pub use order::*;
pub use process::*;
pub use task::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five record collections. Each maps to one fixed storage key and one
/// family of request/state paths (`{key}/add`, `{key}/list`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Processes,
    Materials,
    Tasks,
    Orders,
    Deliveries,
}

impl Collection {
    /// Every collection, in dashboard order.
    pub const ALL: [Collection; 5] = [
        Collection::Processes,
        Collection::Materials,
        Collection::Tasks,
        Collection::Orders,
        Collection::Deliveries,
    ];

    /// Storage key and path prefix.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Processes => "processes",
            Collection::Materials => "materials",
            Collection::Tasks => "tasks",
            Collection::Orders => "orders",
            Collection::Deliveries => "deliveries",
        }
    }

    /// Human-readable singular name used in form messages.
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Processes => "process",
            Collection::Materials => "material",
            Collection::Tasks => "task",
            Collection::Orders => "client order",
            Collection::Deliveries => "delivery record",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// In-memory contents of all five collections, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    pub processes: Vec<ProcessRecord>,
    pub materials: Vec<MaterialRecord>,
    pub tasks: Vec<TaskRecord>,
    pub orders: Vec<OrderRecord>,
    pub deliveries: Vec<DeliveryRecord>,
}

impl Collections {
    /// True when every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
            && self.materials.is_empty()
            && self.tasks.is_empty()
            && self.orders.is_empty()
            && self.deliveries.is_empty()
    }

    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Processes => self.processes.len(),
            Collection::Materials => self.materials.len(),
            Collection::Tasks => self.tasks.len(),
            Collection::Orders => self.orders.len(),
            Collection::Deliveries => self.deliveries.len(),
        }
    }
}

/// A persisted record kind.
///
/// Identity is a v4 UUID assigned at creation and never changed. Records
/// have no update path: they are added whole and deleted whole.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Which collection this record lives in.
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;

    /// Short title for list rows and confirmation messages.
    fn display_name(&self) -> &str;

    /// Fields the list screen searches over.
    fn search_fields(&self) -> Vec<&str>;

    fn collection(all: &Collections) -> &Vec<Self>;

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self>;

    /// Case-insensitive substring match over `search_fields`.
    /// An empty query matches every record.
    fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
