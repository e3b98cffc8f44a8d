//! Flux: path-addressed state engine.
//!
//! Rust owns the application state and logic; the native shell only renders.
//! The shell emits requests (`orders/add`, `app/initialize`, ...) and
//! subscribes to the state paths it draws (`dashboard/counts`,
//! `orders/list`, `gate/state`, ...).
//!
//! # Path Addressing
//!
//! All state and requests live in a flat path namespace with `/` as the
//! separator. Subscriptions and handlers accept MQTT-style patterns:
//! - Exact: `gate/state`
//! - Single-level: `+/list` matches `orders/list`, `tasks/list`
//! - Multi-level: `orders/#` matches everything under `orders/`
//!
//! # Example
//!
//! ```ignore
//! let app = Flux::new();
//! app.on("app/initialize", |_, _, store| async move {
//!     store.set("app/presentation", Presentation::Loading);
//! });
//! app.subscribe("#", |path, _| println!("state changed: {}", path));
//! app.emit("app/initialize", ()).await;
//! ```

pub mod app;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
