use thiserror::Error;
use vetria_kv::KVError;

/// Errors surfaced while building a session.
///
/// Runtime store and gate failures never reach callers; they are logged and
/// absorbed (see `GlassStore` and `AccessGate`).
#[derive(Error, Debug)]
pub enum GlassError {
    #[error(transparent)]
    Storage(#[from] KVError),

    #[error("config error: {0}")]
    Config(String),

    #[error("probe error: {0}")]
    Probe(String),
}
