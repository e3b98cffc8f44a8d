use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::topic;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-routed change notifications.
///
/// - `set(path, value)` stores a value and notifies all matching subscribers.
/// - `get(path)` reads the current value (Arc clone, cheap).
/// - `subscribe(pattern, handler)` registers a change handler.
/// - `unsubscribe(id)` removes it again.
///
/// Handlers run synchronously on the caller of `set`, after the value lock
/// has been released, in subscription order.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    /// Create a new empty StateStore.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at the given path and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built StateValue at the given path and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            values.insert(path.to_string(), value.clone());
        }

        let matching: Vec<ChangeHandler> = {
            let subs = self.subscribers.read().unwrap_or_else(PoisonError::into_inner);
            subs.iter()
                .filter(|s| topic::matches(&s.pattern, path))
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };
        for handler in matching {
            handler(path, &value);
        }
    }

    /// Get the current state value at the given path.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(path).cloned()
    }

    /// Get the value at `path` downcast and cloned to `T`.
    ///
    /// Returns `None` if the path is unset or holds a different type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_cloned::<T>())
    }

    /// Subscribe to state changes matching `pattern` (`+` and `#` wildcards).
    ///
    /// An invalid pattern is accepted but logged; it simply never matches
    /// anything a well-formed path would produce.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        if !topic::is_valid_pattern(pattern) {
            warn!("StateStore: subscribing with malformed pattern {:?}", pattern);
        }
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subs = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        subs.push(Subscriber {
            id,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() < before
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Counts {
        orders: usize,
    }

    #[test]
    fn set_and_get() {
        let store = StateStore::new();
        assert!(store.get("dashboard/counts").is_none());

        store.set("dashboard/counts", Counts { orders: 3 });
        assert_eq!(store.get_as::<Counts>("dashboard/counts"), Some(Counts { orders: 3 }));
    }

    #[test]
    fn get_as_wrong_type_is_none() {
        let store = StateStore::new();
        store.set("x", 1u32);
        assert_eq!(store.get_as::<String>("x"), None);
        assert_eq!(store.get_as::<u32>("missing"), None);
    }

    #[test]
    fn overwrite_replaces_value() {
        let store = StateStore::new();
        store.set("gate/state", "idle".to_string());
        store.set("gate/state", "validating".to_string());
        assert_eq!(store.get_as::<String>("gate/state").as_deref(), Some("validating"));
    }

    #[test]
    fn subscribers_see_matching_paths_in_order() {
        let store = StateStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = seen.clone();
        store.subscribe("orders/+", move |p, _| seen_c.lock().unwrap().push(p.to_string()));

        store.set("orders/list", 1u32);
        store.set("tasks/list", 2u32);
        store.set("orders/form", 3u32);

        assert_eq!(*seen.lock().unwrap(), vec!["orders/list", "orders/form"]);
    }

    #[test]
    fn handler_receives_new_value() {
        let store = StateStore::new();
        let last = Arc::new(Mutex::new(None));
        let last_c = last.clone();
        store.subscribe("dashboard/counts", move |_, v| {
            *last_c.lock().unwrap() = v.downcast_cloned::<Counts>();
        });

        store.set("dashboard/counts", Counts { orders: 9 });
        assert_eq!(*last.lock().unwrap(), Some(Counts { orders: 9 }));
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = StateStore::new();
        let hits = Arc::new(AtomicU64::new(0));
        let hits_c = hits.clone();
        let id = store.subscribe("#", move |_, _| {
            hits_c.fetch_add(1, Ordering::Relaxed);
        });

        store.set("a", 1u32);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("a", 2u32);

        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn handler_may_read_store_reentrantly() {
        let store = Arc::new(StateStore::new());
        let read_back = Arc::new(Mutex::new(None));
        let (store_c, read_c) = (store.clone(), read_back.clone());
        store.subscribe("gate/state", move |p, _| {
            *read_c.lock().unwrap() = store_c.get_as::<u32>(p);
        });

        store.set("gate/state", 5u32);
        assert_eq!(*read_back.lock().unwrap(), Some(5));
    }

    #[test]
    fn subscription_ids_are_unique() {
        let store = StateStore::new();
        let a = store.subscribe("a", |_, _| {});
        let b = store.subscribe("a", |_, _| {});
        assert_ne!(a, b);
    }
}
