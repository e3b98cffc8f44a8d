//! End-to-end session tests: config → GlassApp → requests → published state.

use std::sync::{Arc, Mutex};

use vetria_glass::bff::codec::{decode_request, encode_state};
use vetria_glass::bff::state::{DashboardCounts, FormOutcome, RecordList};
use vetria_glass::config::{AppConfig, StorageConfig};
use vetria_glass::model::{OrderRecord, ProcessRecord};
use vetria_glass::{AccessProbe, GateState, GlassApp, NativeOnly, Presentation, ProbeOutcome};
use vetria_kv::{KVStore, MemoryKV};

struct Approve;

#[async_trait::async_trait]
impl AccessProbe for Approve {
    async fn check(&self) -> ProbeOutcome {
        ProbeOutcome::Approved {
            payload: serde_json::json!({"url": "https://portal.example"}),
            destination: "https://portal.example".into(),
        }
    }
}

async fn emit_json(app: &GlassApp, path: &str, json: &str) {
    let payload = decode_request(path, json).expect("decodable request");
    app.flux().emit_arc(path, payload).await;
}

fn counts(app: &GlassApp) -> DashboardCounts {
    app.flux()
        .get_as::<DashboardCounts>(DashboardCounts::PATH)
        .unwrap()
}

#[tokio::test]
async fn native_launch_seeds_demo_records() {
    let app = GlassApp::with_parts(Arc::new(MemoryKV::new()), Arc::new(NativeOnly));
    app.initialize().await;

    assert_eq!(
        app.flux().get_as::<Presentation>(Presentation::PATH),
        Some(Presentation::Native)
    );
    assert_eq!(
        counts(&app),
        DashboardCounts {
            processes: 1,
            materials: 1,
            tasks: 1,
            orders: 1,
            deliveries: 1,
        }
    );
    let json = encode_state(
        "processes/list",
        &app.flux().get("processes/list").unwrap(),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(json["items"][0]["title"], "Tempered Glass Heating");
    assert_eq!(json["items"][0]["energyUsedKWh"], 12.5);
}

#[tokio::test]
async fn order_form_computes_total() {
    let app = GlassApp::with_parts(Arc::new(MemoryKV::new()), Arc::new(NativeOnly));
    app.initialize().await;

    emit_json(
        &app,
        "orders/add",
        r#"{
            "orderNumber": "ORD-2001",
            "clientName": "Harbor Windows",
            "clientPhone": "+15550100",
            "clientEmail": "buy@harbor.example",
            "clientAddress": "9 Quay Street",
            "orderDetails": "50 tempered sheets",
            "quantity": "50",
            "unitPrice": "25",
            "discountPercent": "5",
            "taxPercent": "10",
            "shippingCost": "100"
        }"#,
    )
    .await;

    let outcome = app.flux().get_as::<FormOutcome>("orders/form").unwrap();
    assert!(outcome.ok, "{:?}", outcome.errors);
    let orders = app
        .flux()
        .get_as::<RecordList<OrderRecord>>("orders/list")
        .unwrap()
        .items;
    assert_eq!(orders.len(), 2);
    assert!((orders[1].total_price - 1406.25).abs() < 1e-9);
}

#[tokio::test]
async fn records_survive_a_relaunch() {
    let kv: Arc<dyn KVStore> = Arc::new(MemoryKV::new());

    let first = GlassApp::with_parts(kv.clone(), Arc::new(NativeOnly));
    first.initialize().await;
    emit_json(&first, "dashboard/quick-add", r#"{"kind":"process"}"#).await;
    let seeded = first
        .flux()
        .get_as::<RecordList<ProcessRecord>>("processes/list")
        .unwrap()
        .items;
    emit_json(
        &first,
        "processes/delete",
        &format!(r#"{{"id":"{}"}}"#, seeded[0].id),
    )
    .await;

    let second = GlassApp::with_parts(kv, Arc::new(NativeOnly));
    second.initialize().await;
    let processes = second
        .flux()
        .get_as::<RecordList<ProcessRecord>>("processes/list")
        .unwrap()
        .items;
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].title, "New Process");
    assert_eq!(counts(&second).orders, 1);
}

#[tokio::test]
async fn approval_suppresses_native_screens() {
    let kv = Arc::new(MemoryKV::new());
    let app = GlassApp::with_parts(kv.clone(), Arc::new(Approve));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    app.flux().subscribe("app/#", move |path, _| {
        sink.lock().unwrap().push(path.to_string());
    });

    app.initialize().await;
    emit_json(&app, "dashboard/quick-add", r#"{"kind":"order"}"#).await;

    assert_eq!(
        app.flux().get_as::<Presentation>(Presentation::PATH),
        Some(Presentation::Remote {
            url: "https://portal.example".into()
        })
    );
    assert!(app.flux().get(DashboardCounts::PATH).is_none());
    // Storage is never touched.
    assert!(kv.is_empty());
    assert!(!seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_initialize_keeps_first_verdict() {
    let app = GlassApp::with_parts(Arc::new(MemoryKV::new()), Arc::new(NativeOnly));
    app.initialize().await;
    emit_json(&app, "dashboard/quick-add", r#"{"kind":"material"}"#).await;
    app.initialize().await;

    assert_eq!(app.context().gate.state(), GateState::UseNative);
    assert_eq!(counts(&app).materials, 2);
}

#[tokio::test]
async fn open_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage: StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    };

    {
        let app = GlassApp::open(&config).unwrap();
        app.initialize().await;
        emit_json(&app, "dashboard/quick-add", r#"{"kind":"order"}"#).await;
    }

    let app = GlassApp::open(&config).unwrap();
    app.initialize().await;
    assert_eq!(counts(&app).orders, 2);
    assert!(config.storage.db_path().exists());
}
