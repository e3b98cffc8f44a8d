//! Request handlers and Flux wiring for the native screens.
//!
//! `register_handlers` binds every request path to a handler that works on
//! the shared `GlassContext` and publishes the resulting state. Record
//! requests are dropped until the gate has settled on native.

pub mod codec;
pub mod request;
pub mod state;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;
use vetria_flux::{Flux, Payload, StateStore};

use crate::form::{DeliveryForm, MaterialForm, OrderForm, ProcessForm, RecordForm, TaskForm};
use crate::gate::{AccessGate, GateState};
use crate::model::{
    Collection, DeliveryRecord, MaterialRecord, OrderRecord, ProcessRecord, Record, TaskRecord,
};
use crate::store::GlassStore;

use self::request::*;
use self::state::*;

/// Per-session backend context shared by every handler.
pub struct GlassContext {
    pub gate: AccessGate,
    pub store: GlassStore,
    loaded: AtomicBool,
}

impl GlassContext {
    pub fn new(gate: AccessGate, store: GlassStore) -> Self {
        Self {
            gate,
            store,
            loaded: AtomicBool::new(false),
        }
    }

    /// Whether a record request on `path` may run.
    fn accepts(&self, path: &str) -> bool {
        if self.gate.is_native() {
            return true;
        }
        debug!("{}: ignored, gate is {:?}", path, self.gate.state());
        false
    }

    fn publish_counts(&self, state: &StateStore) {
        state.set(DashboardCounts::PATH, self.store.counts());
    }

    /// Republish one list, keeping the query the screen last searched with.
    fn publish_list<T: Record>(&self, state: &StateStore, query: Option<&str>) {
        let path = list_path(T::COLLECTION);
        let query = match query {
            Some(q) => q.to_string(),
            None => state
                .get(&path)
                .and_then(|v| v.downcast_ref::<RecordList<T>>().map(|l| l.query.clone()))
                .unwrap_or_default(),
        };
        let items = self
            .store
            .records::<T>()
            .into_iter()
            .filter(|r| r.matches(&query))
            .collect();
        state.set(&path, RecordList { query, items });
    }

    fn publish_collection(&self, state: &StateStore, collection: Collection) {
        match collection {
            Collection::Processes => self.publish_list::<ProcessRecord>(state, None),
            Collection::Materials => self.publish_list::<MaterialRecord>(state, None),
            Collection::Tasks => self.publish_list::<TaskRecord>(state, None),
            Collection::Orders => self.publish_list::<OrderRecord>(state, None),
            Collection::Deliveries => self.publish_list::<DeliveryRecord>(state, None),
        }
        self.publish_counts(state);
    }
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<GlassContext>) {
    // app/initialize
    {
        let ctx = ctx.clone();
        flux.on(InitializeReq::PATH, move |_, _, state: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                handle_initialize(&ctx, &state).await;
            }
        });
    }

    register_collection::<ProcessForm>(flux, &ctx);
    register_collection::<MaterialForm>(flux, &ctx);
    register_collection::<TaskForm>(flux, &ctx);
    register_collection::<OrderForm>(flux, &ctx);
    register_collection::<DeliveryForm>(flux, &ctx);

    // dashboard/quick-add
    {
        let ctx = ctx.clone();
        flux.on(
            QuickAddReq::PATH,
            move |path: String, payload: Payload, state: Arc<StateStore>| {
                let ctx = ctx.clone();
                async move {
                    if !ctx.accepts(&path) {
                        return;
                    }
                    match payload.downcast_ref::<QuickAddReq>() {
                        Some(req) => handle_quick_add(req, &ctx, &state),
                        None => warn!("{}: unexpected payload type", path),
                    }
                }
            },
        );
    }
}

/// `{collection}/add`, `{collection}/delete` and `{collection}/search` for
/// the record type `F` produces.
fn register_collection<F: RecordForm>(flux: &Flux, ctx: &Arc<GlassContext>) {
    let collection = <F::Output as Record>::COLLECTION;

    {
        let ctx = ctx.clone();
        flux.on(
            &add_path(collection),
            move |path: String, payload: Payload, state: Arc<StateStore>| {
                let ctx = ctx.clone();
                async move {
                    if !ctx.accepts(&path) {
                        return;
                    }
                    match payload.downcast_ref::<F>() {
                        Some(form) => handle_add(form, &ctx, &state),
                        None => warn!("{}: unexpected payload type", path),
                    }
                }
            },
        );
    }

    {
        let ctx = ctx.clone();
        flux.on(
            &delete_path(collection),
            move |path: String, payload: Payload, state: Arc<StateStore>| {
                let ctx = ctx.clone();
                async move {
                    if !ctx.accepts(&path) {
                        return;
                    }
                    match payload.downcast_ref::<DeleteReq>() {
                        Some(req) => handle_delete::<F::Output>(req, &ctx, &state),
                        None => warn!("{}: unexpected payload type", path),
                    }
                }
            },
        );
    }

    {
        let ctx = ctx.clone();
        flux.on(
            &search_path(collection),
            move |path: String, payload: Payload, state: Arc<StateStore>| {
                let ctx = ctx.clone();
                async move {
                    if !ctx.accepts(&path) {
                        return;
                    }
                    match payload.downcast_ref::<SearchReq>() {
                        Some(req) => {
                            ctx.publish_list::<F::Output>(&state, Some(req.query.as_str()))
                        }
                        None => warn!("{}: unexpected payload type", path),
                    }
                }
            },
        );
    }
}

/// Handle `app/initialize`.
async fn handle_initialize(ctx: &GlassContext, state: &StateStore) {
    if ctx.gate.initiate_validation().await != GateState::UseNative {
        return;
    }
    if !ctx.loaded.swap(true, Ordering::SeqCst) {
        ctx.store.initialize();
    }
    state.set(ProcessLabels::PATH, ProcessLabels::table());
    for collection in Collection::ALL {
        ctx.publish_collection(state, collection);
    }
}

/// Handle `{collection}/add`.
fn handle_add<F: RecordForm>(form: &F, ctx: &GlassContext, state: &StateStore) {
    let collection = <F::Output as Record>::COLLECTION;
    let outcome = match form.validate(Utc::now()) {
        Ok(record) => {
            let outcome = FormOutcome::saved(collection, record.display_name());
            ctx.store.add(record);
            ctx.publish_collection(state, collection);
            outcome
        }
        Err(errors) => {
            debug!("{}: rejected, {} problem(s)", add_path(collection), errors.messages.len());
            FormOutcome::rejected(collection, errors.messages)
        }
    };
    state.set(&form_path(collection), outcome);
}

/// Handle `{collection}/delete`.
fn handle_delete<T: Record>(req: &DeleteReq, ctx: &GlassContext, state: &StateStore) {
    ctx.store.delete::<T>(req.id);
    ctx.publish_collection(state, T::COLLECTION);
}

/// Handle `dashboard/quick-add`.
fn handle_quick_add(req: &QuickAddReq, ctx: &GlassContext, state: &StateStore) {
    let now = Utc::now();
    let collection = match req.kind {
        QuickAdd::Process => {
            ctx.store.add(ProcessRecord::placeholder(now));
            Collection::Processes
        }
        QuickAdd::Material => {
            ctx.store.add(MaterialRecord::placeholder(now));
            Collection::Materials
        }
        QuickAdd::Order => {
            ctx.store.add(OrderRecord::placeholder(now, order_serial()));
            Collection::Orders
        }
    };
    ctx.publish_collection(state, collection);
}

/// Random order number in 1000..=9999.
fn order_serial() -> u32 {
    1000 + (Uuid::new_v4().as_u128() % 9000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{AccessProbe, NativeOnly, ProbeOutcome};
    use vetria_kv::MemoryKV;

    struct Approve;

    #[async_trait::async_trait]
    impl AccessProbe for Approve {
        async fn check(&self) -> ProbeOutcome {
            ProbeOutcome::Approved {
                payload: serde_json::json!({}),
                destination: "https://portal.example".into(),
            }
        }
    }

    fn setup(probe: Arc<dyn AccessProbe>) -> Flux {
        let flux = Flux::new();
        let ctx = Arc::new(GlassContext::new(
            AccessGate::new(probe, flux.store().clone()),
            GlassStore::new(Arc::new(MemoryKV::new())),
        ));
        register_handlers(&flux, ctx);
        flux
    }

    fn counts(flux: &Flux) -> DashboardCounts {
        flux.get_as::<DashboardCounts>(DashboardCounts::PATH).unwrap()
    }

    #[test]
    fn order_serials_stay_four_digits() {
        for _ in 0..200 {
            let n = order_serial();
            assert!((1000..=9999).contains(&n));
        }
    }

    #[tokio::test]
    async fn initialize_publishes_lists_and_counts() {
        let flux = setup(Arc::new(NativeOnly));
        flux.emit(InitializeReq::PATH, InitializeReq).await;

        assert_eq!(counts(&flux).orders, 1);
        let list = flux
            .get_as::<RecordList<DeliveryRecord>>("deliveries/list")
            .unwrap();
        assert_eq!(list.items[0].delivery_number, "DEL-1001");
        assert!(flux.get(ProcessLabels::PATH).is_some());
    }

    #[tokio::test]
    async fn rejected_form_reports_errors_and_adds_nothing() {
        let flux = setup(Arc::new(NativeOnly));
        flux.emit(InitializeReq::PATH, InitializeReq).await;
        flux.emit("tasks/add", TaskForm::default()).await;

        let outcome = flux.get_as::<FormOutcome>("tasks/form").unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.errors[0], "Title is required.");
        assert_eq!(counts(&flux).tasks, 1);
    }

    #[tokio::test]
    async fn search_then_add_keeps_query() {
        let flux = setup(Arc::new(NativeOnly));
        flux.emit(InitializeReq::PATH, InitializeReq).await;
        flux.emit("materials/search", SearchReq { query: "zzz".into() }).await;
        assert!(flux
            .get_as::<RecordList<MaterialRecord>>("materials/list")
            .unwrap()
            .items
            .is_empty());

        flux.emit(QuickAddReq::PATH, QuickAddReq { kind: QuickAdd::Material })
            .await;
        let list = flux
            .get_as::<RecordList<MaterialRecord>>("materials/list")
            .unwrap();
        assert_eq!(list.query, "zzz");
        assert!(list.items.is_empty());
        assert_eq!(counts(&flux).materials, 2);
    }

    #[tokio::test]
    async fn approved_session_ignores_record_requests() {
        let flux = setup(Arc::new(Approve));
        flux.emit(InitializeReq::PATH, InitializeReq).await;
        flux.emit(QuickAddReq::PATH, QuickAddReq { kind: QuickAdd::Order })
            .await;

        assert!(flux.get(DashboardCounts::PATH).is_none());
        assert!(flux.get("orders/list").is_none());
    }

    #[tokio::test]
    async fn requests_before_initialize_are_dropped() {
        let flux = setup(Arc::new(NativeOnly));
        flux.emit(QuickAddReq::PATH, QuickAddReq { kind: QuickAdd::Process })
            .await;
        assert!(flux.get(DashboardCounts::PATH).is_none());

        flux.emit(InitializeReq::PATH, InitializeReq).await;
        assert_eq!(counts(&flux).processes, 1);
    }
}
