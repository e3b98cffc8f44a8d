//! Access Gate: decides once per launch whether the app shows its native
//! screens or hands over to a remote destination.

mod probe;

pub use probe::{AccessProbe, HttpProbe, NativeOnly, ProbeOutcome};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use vetria_flux::StateStore;

/// Gate lifecycle: stored at `gate/state`.
///
/// `Idle` → `Validating` → exactly one of `Approved` / `UseNative`, then
/// frozen for the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum GateState {
    Idle,
    Validating,
    Approved { payload: Value, destination: String },
    UseNative,
}

impl GateState {
    pub const PATH: &'static str = "gate/state";

    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Approved { .. } | GateState::UseNative)
    }
}

/// What the shell should put on screen: stored at `app/presentation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Presentation {
    Loading,
    Native,
    Remote { url: String },
}

impl Presentation {
    pub const PATH: &'static str = "app/presentation";
}

impl From<&GateState> for Presentation {
    fn from(state: &GateState) -> Self {
        match state {
            GateState::Idle | GateState::Validating => Presentation::Loading,
            GateState::Approved { destination, .. } => Presentation::Remote {
                url: destination.clone(),
            },
            GateState::UseNative => Presentation::Native,
        }
    }
}

/// Runs the access probe at most once and publishes every transition
/// (plus the derived presentation) into the state store.
pub struct AccessGate {
    probe: Arc<dyn AccessProbe>,
    store: Arc<StateStore>,
    started: AtomicBool,
}

impl AccessGate {
    pub fn new(probe: Arc<dyn AccessProbe>, store: Arc<StateStore>) -> Self {
        let gate = Self {
            probe,
            store,
            started: AtomicBool::new(false),
        };
        gate.publish(GateState::Idle);
        gate
    }

    pub fn state(&self) -> GateState {
        self.store
            .get_as::<GateState>(GateState::PATH)
            .unwrap_or(GateState::Idle)
    }

    /// Native screens may run. False until the gate settles on native.
    pub fn is_native(&self) -> bool {
        self.state() == GateState::UseNative
    }

    /// Run the probe and publish its verdict. Only the first call does
    /// anything; later calls return the current state unchanged.
    pub async fn initiate_validation(&self) -> GateState {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("AccessGate: validation already started, ignoring");
            return self.state();
        }

        self.publish(GateState::Validating);
        let state = match self.probe.check().await {
            ProbeOutcome::Approved {
                payload,
                destination,
            } => {
                info!("AccessGate: approved, destination {}", destination);
                GateState::Approved {
                    payload,
                    destination,
                }
            }
            ProbeOutcome::UseNative => {
                info!("AccessGate: using native screens");
                GateState::UseNative
            }
        };
        self.publish(state.clone());
        state
    }

    fn publish(&self, state: GateState) {
        let presentation = Presentation::from(&state);
        self.store.set(GateState::PATH, state);
        self.store.set(Presentation::PATH, presentation);
    }
}
