//! Vetria: glass manufacturing records and the launch-time access gate.
//!
//! - `model`: the five record kinds and the `Record` trait
//! - `form`: add forms and their validation
//! - `store`: `GlassStore`, the persisted record collections
//! - `gate`: `AccessGate`, native vs. remote presentation
//! - `bff`: Flux request handlers, UI state, JSON codec
//! - `session`: `GlassApp`, one fully wired launch

pub mod bff;
pub mod config;
pub mod error;
pub mod form;
pub mod gate;
pub mod labels;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;

pub use config::AppConfig;
pub use error::GlassError;
pub use gate::{AccessGate, AccessProbe, GateState, HttpProbe, NativeOnly, Presentation, ProbeOutcome};
pub use session::GlassApp;
pub use store::GlassStore;
