use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// Flux: the state engine a native shell drives.
///
/// Three primitives, all path-based:
/// - `get(path)`: read state at a path (Arc, zero-copy)
/// - `emit(path, payload)`: send a request to the handler(s) for that path
/// - `subscribe(pattern)`: observe state changes
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    /// Create a new Flux instance with empty state and no handlers.
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    /// Read the state value at a path.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read and clone the state at a path as `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as::<T>(path)
    }

    /// Emit a request and wait for handler(s) to complete.
    ///
    /// If no handler matches, this is a silent no-op.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    /// Emit a request with a pre-built Arc payload.
    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Subscribe to state changes matching a pattern.
    ///
    /// The handler is called synchronously on the thread that calls `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    /// Unsubscribe a handler by its ID.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// The underlying StateStore.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Phase {
        Idle,
        Done(u32),
    }

    #[tokio::test]
    async fn emit_updates_state_and_notifies() {
        let flux = Flux::new();
        flux.store().set("job/state", Phase::Idle);

        flux.on("job/run", |_, payload, store: Arc<StateStore>| async move {
            let n = payload.downcast_ref::<u32>().copied().unwrap_or(0);
            store.set("job/state", Phase::Done(n));
        });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = seen.clone();
        let id = flux.subscribe("job/#", move |_, v| {
            seen_c.lock().unwrap().push(v.downcast_cloned::<Phase>());
        });

        flux.emit("job/run", 4u32).await;
        assert_eq!(flux.get_as::<Phase>("job/state"), Some(Phase::Done(4)));
        assert_eq!(*seen.lock().unwrap(), vec![Some(Phase::Done(4))]);

        assert!(flux.unsubscribe(id));
        flux.emit("job/run", 5u32).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn emit_without_handler_is_noop() {
        let flux = Flux::default();
        flux.emit("nothing/here", ()).await;
        assert!(flux.get("nothing/here").is_none());
    }
}
