use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::store::StateStore;
use crate::topic;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Type-erased handler function stored in the router.
///
/// Takes owned values so the returned future can be `'static`:
/// - `String`: the matched request path
/// - `Payload`: type-erased request payload
/// - `Arc<StateStore>`: the state store for reading/writing state
type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers.
///
/// Multiple handlers can match a single path (via wildcards); all of them
/// run sequentially in registration order.
pub struct Router {
    routes: RwLock<Vec<(String, ErasedHandler)>>,
}

impl Router {
    /// Create a new empty router.
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
        }
    }

    /// Register an async handler for a path pattern (`+`, `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        routes.push((pattern.to_string(), handler));
    }

    /// Dispatch a request to all matching handlers.
    ///
    /// If no handler matches, this is a no-op (no error).
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.matching(path);
        if handlers.is_empty() {
            debug!("Router: no handler for {}", path);
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    // Cloned out so no lock is held across handler awaits.
    fn matching(&self, path: &str) -> Vec<ErasedHandler> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes
            .iter()
            .filter(|(pattern, _)| topic::matches(pattern, path))
            .map(|(_, h)| Arc::clone(h))
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
