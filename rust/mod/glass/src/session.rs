use std::sync::Arc;

use tracing::info;
use vetria_flux::Flux;
use vetria_kv::KVStore;

use crate::bff::request::InitializeReq;
use crate::bff::{GlassContext, register_handlers};
use crate::config::AppConfig;
use crate::error::GlassError;
use crate::gate::{AccessGate, AccessProbe};
use crate::store::GlassStore;

/// One app launch: a Flux instance with every handler registered, plus the
/// context those handlers share.
pub struct GlassApp {
    flux: Flux,
    ctx: Arc<GlassContext>,
}

impl GlassApp {
    /// Build a session from configuration: open storage, pick the probe.
    pub fn open(config: &AppConfig) -> Result<Self, GlassError> {
        let kv = config.storage.open_kv()?;
        let probe = config.gate.probe()?;
        info!(
            "GlassApp: storage {:?}, gate {}",
            config.storage.backend,
            config.gate.endpoint.as_deref().unwrap_or("native-only")
        );
        Ok(Self::with_parts(kv, probe))
    }

    pub fn with_parts(kv: Arc<dyn KVStore>, probe: Arc<dyn AccessProbe>) -> Self {
        let flux = Flux::new();
        let gate = AccessGate::new(probe, flux.store().clone());
        let ctx = Arc::new(GlassContext::new(gate, GlassStore::new(kv)));
        register_handlers(&flux, ctx.clone());
        Self { flux, ctx }
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    pub fn context(&self) -> &Arc<GlassContext> {
        &self.ctx
    }

    /// Emit `app/initialize`.
    pub async fn initialize(&self) {
        self.flux.emit(InitializeReq::PATH, InitializeReq).await;
    }
}
