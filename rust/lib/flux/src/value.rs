use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Wraps `Arc<dyn Any + Send + Sync>` so every subscriber of a path shares
/// one copy. Clone is an atomic increment.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    /// Create a new StateValue from any `Send + Sync` type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Try to downcast to a concrete type reference.
    ///
    /// Returns `None` if the stored type doesn't match `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Downcast and clone the concrete value out.
    pub fn downcast_cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Handle for a subscription, returned by `StateStore::subscribe()`.
///
/// The raw number is stable for the lifetime of the store, so platform
/// bindings can hand it across FFI and give it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}
