//! Vetria FFI: C-compatible API for the native shell.
//!
//! Protocol:
//! - State crosses the boundary as JSON bytes.
//! - Strings are passed as null-terminated UTF-8 C strings.
//! - Byte buffers are returned as `VetriaBytes { ptr, len }`; the caller
//!   frees them with `vetria_bytes_free`.
//! - Callbacks receive (path, json_bytes, json_len, user_data) on the thread
//!   that caused the change. For `app/initialize` that is the handle's
//!   background worker, so the shell must hop back to its UI thread.
//!
//! Every call on a handle must come from the same (UI) thread. No call
//! blocks on the network: `app/initialize` returns at once and the gate's
//! verdict arrives through subscriptions.

use std::ffi::{CStr, CString, c_char, c_void};
use std::path::Path;
use std::sync::Arc;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use vetria_flux::SubscriptionId;
use vetria_glass::bff::codec::{decode_request, encode_state};
use vetria_glass::bff::request::InitializeReq;
use vetria_glass::{AppConfig, GlassApp};

/// Opaque handle to one session and the runtime its requests run on.
///
/// The runtime owns one worker thread, which drives `app/initialize` off the
/// caller's thread.
pub struct VetriaHandle {
    app: Arc<GlassApp>,
    rt: tokio::runtime::Runtime,
}

/// Byte buffer returned from FFI calls. Free with `vetria_bytes_free`.
#[repr(C)]
pub struct VetriaBytes {
    pub ptr: *const u8,
    pub len: usize,
}

impl VetriaBytes {
    fn empty() -> Self {
        Self {
            ptr: std::ptr::null(),
            len: 0,
        }
    }

    fn from_vec(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::empty();
        }
        let boxed = bytes.into_boxed_slice();
        let len = boxed.len();
        Self {
            ptr: Box::into_raw(boxed) as *const u8,
            len,
        }
    }
}

/// Subscription callback: (path, json_bytes, json_len, user_data).
pub type VetriaCallback =
    extern "C" fn(path: *const c_char, data: *const u8, data_len: usize, user_data: *mut c_void);

/// Borrow a C string as `&str`. None for null or non-UTF-8 input.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Another handle may already have installed it.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Create a session from the TOML config at `config_path` (null or missing
/// file means defaults). Returns null on failure. Free with `vetria_free`.
///
/// # Safety
/// `config_path` must be null or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_create(config_path: *const c_char) -> *mut VetriaHandle {
    init_tracing();

    let config = match unsafe { c_str(config_path) } {
        Some(path) => match AppConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("vetria_create: config {}: {:#}", path, e);
                return std::ptr::null_mut();
            }
        },
        None => AppConfig::default(),
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("vetria-worker")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("vetria_create: runtime: {}", e);
            return std::ptr::null_mut();
        }
    };

    let app = match GlassApp::open(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("vetria_create: {}", e);
            return std::ptr::null_mut();
        }
    };

    Box::into_raw(Box::new(VetriaHandle {
        app: Arc::new(app),
        rt,
    }))
}

/// Free a handle from `vetria_create`.
///
/// # Safety
/// `handle` must be null or a pointer from `vetria_create` not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_free(handle: *mut VetriaHandle) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

// ============================================================================
// State: read
// ============================================================================

/// Get the state at `path` as JSON. Returns `{ null, 0 }` when nothing is
/// stored there.
///
/// # Safety
/// `handle` must come from `vetria_create`; `path` must be a valid string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_get(handle: *const VetriaHandle, path: *const c_char) -> VetriaBytes {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return VetriaBytes::empty();
    };
    let Some(path) = (unsafe { c_str(path) }) else {
        return VetriaBytes::empty();
    };
    handle
        .app
        .flux()
        .get(path)
        .and_then(|value| encode_state(path, &value))
        .map(VetriaBytes::from_vec)
        .unwrap_or_else(VetriaBytes::empty)
}

/// Free bytes returned by `vetria_get`.
///
/// # Safety
/// `bytes` must come from `vetria_get` and be freed once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_bytes_free(bytes: VetriaBytes) {
    if !bytes.ptr.is_null() && bytes.len > 0 {
        let slice = std::ptr::slice_from_raw_parts_mut(bytes.ptr as *mut u8, bytes.len);
        unsafe { drop(Box::from_raw(slice)) };
    }
}

// ============================================================================
// Requests: emit
// ============================================================================

/// Emit the request at `path` with a JSON body (null reads as `{}`). False
/// when the path or body is not understood.
///
/// `app/initialize` is handed to the worker thread and this returns before
/// the gate has decided. Every other request runs to completion before
/// returning.
///
/// # Safety
/// `handle` must come from `vetria_create`; `path` must be a valid string;
/// `payload_json` must be null or a valid string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_emit(
    handle: *mut VetriaHandle,
    path: *const c_char,
    payload_json: *const c_char,
) -> bool {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return false;
    };
    let Some(path) = (unsafe { c_str(path) }) else {
        return false;
    };
    let json = unsafe { c_str(payload_json) }.unwrap_or("");

    let Some(payload) = decode_request(path, json) else {
        warn!("vetria_emit: unsupported request {}", path);
        return false;
    };
    if path == InitializeReq::PATH {
        let app = Arc::clone(&handle.app);
        let path = path.to_string();
        handle.rt.spawn(async move {
            app.flux().emit_arc(&path, payload).await;
        });
    } else {
        handle
            .rt
            .block_on(handle.app.flux().emit_arc(path, payload));
    }
    true
}

// ============================================================================
// Subscriptions
// ============================================================================

/// Subscribe to state changes matching `pattern` (`+` and `#` wildcards).
/// Returns a subscription id for `vetria_unsubscribe`, or 0 on bad input.
///
/// # Safety
/// `handle` must come from `vetria_create`; `pattern` must be a valid
/// string. `user_data` is passed back untouched; the caller keeps it alive.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_subscribe(
    handle: *mut VetriaHandle,
    pattern: *const c_char,
    callback: VetriaCallback,
    user_data: *mut c_void,
) -> u64 {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    let Some(pattern) = (unsafe { c_str(pattern) }) else {
        return 0;
    };

    // Carried as usize so the closure is Send + Sync; the caller owns thread safety.
    let user_data = user_data as usize;

    let id = handle.app.flux().subscribe(pattern, move |path, value| {
        let Some(json) = encode_state(path, value) else {
            return;
        };
        let Ok(c_path) = CString::new(path) else {
            return;
        };
        callback(
            c_path.as_ptr(),
            json.as_ptr(),
            json.len(),
            user_data as *mut c_void,
        );
    });
    id.raw()
}

/// Remove a subscription. False if the id is unknown.
///
/// # Safety
/// `handle` must come from `vetria_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vetria_unsubscribe(handle: *mut VetriaHandle, id: u64) -> bool {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return false;
    };
    handle.app.flux().unsubscribe(SubscriptionId::from_raw(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    fn write_config(dir: &tempfile::TempDir, toml: &str) -> CString {
        let path = dir.path().join("vetria.toml");
        std::fs::write(&path, toml).unwrap();
        CString::new(path.to_str().unwrap()).unwrap()
    }

    fn memory_config(dir: &tempfile::TempDir) -> CString {
        write_config(dir, "[storage]\nbackend = \"memory\"\n")
    }

    /// Poll until `cond` holds; false after ten seconds.
    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    fn phase(handle: *const VetriaHandle) -> String {
        read_json(handle, "gate/state").unwrap()["phase"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn read_json(handle: *const VetriaHandle, path: &str) -> Option<serde_json::Value> {
        let path = CString::new(path).unwrap();
        let bytes = unsafe { vetria_get(handle, path.as_ptr()) };
        if bytes.ptr.is_null() {
            return None;
        }
        let slice = unsafe { std::slice::from_raw_parts(bytes.ptr, bytes.len) };
        let value = serde_json::from_slice(slice).unwrap();
        unsafe { vetria_bytes_free(bytes) };
        Some(value)
    }

    fn emit(handle: *mut VetriaHandle, path: &str, json: &str) -> bool {
        let path = CString::new(path).unwrap();
        let json = CString::new(json).unwrap();
        unsafe { vetria_emit(handle, path.as_ptr(), json.as_ptr()) }
    }

    extern "C" fn count_calls(
        _path: *const c_char,
        _data: *const u8,
        _len: usize,
        user_data: *mut c_void,
    ) {
        let counter = unsafe { &*(user_data as *const AtomicUsize) };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn initialize_and_read_counts() {
        let dir = tempfile::tempdir().unwrap();
        let config = memory_config(&dir);
        let handle = unsafe { vetria_create(config.as_ptr()) };
        assert!(!handle.is_null());

        assert_eq!(
            read_json(handle, "gate/state").unwrap()["phase"],
            "idle"
        );
        assert!(emit(handle, "app/initialize", ""));
        assert!(wait_until(|| read_json(handle, "dashboard/counts").is_some()));
        assert_eq!(
            read_json(handle, "app/presentation").unwrap()["mode"],
            "native"
        );
        assert_eq!(read_json(handle, "dashboard/counts").unwrap()["orders"], 1);
        assert!(read_json(handle, "nothing/here").is_none());

        unsafe { vetria_free(handle) };
    }

    #[test]
    fn unknown_requests_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = memory_config(&dir);
        let handle = unsafe { vetria_create(config.as_ptr()) };

        assert!(!emit(handle, "orders/update", "{}"));
        assert!(!emit(handle, "orders/delete", r#"{"id":"x"}"#));

        unsafe { vetria_free(handle) };
    }

    #[test]
    fn subscribe_and_unsubscribe() {
        let dir = tempfile::tempdir().unwrap();
        let config = memory_config(&dir);
        let handle = unsafe { vetria_create(config.as_ptr()) };
        let counter = AtomicUsize::new(0);

        let pattern = CString::new("dashboard/#").unwrap();
        let id = unsafe {
            vetria_subscribe(
                handle,
                pattern.as_ptr(),
                count_calls,
                &counter as *const AtomicUsize as *mut c_void,
            )
        };
        assert!(emit(handle, "app/initialize", ""));
        // Initialization republishes the counts once per collection.
        assert!(wait_until(|| counter.load(Ordering::SeqCst) >= 5));
        let after_init = counter.load(Ordering::SeqCst);

        assert!(unsafe { vetria_unsubscribe(handle, id) });
        assert!(!unsafe { vetria_unsubscribe(handle, id) });
        assert!(emit(handle, "dashboard/quick-add", r#"{"kind":"process"}"#));
        assert_eq!(counter.load(Ordering::SeqCst), after_init);
        assert_eq!(read_json(handle, "dashboard/counts").unwrap()["processes"], 2);

        unsafe { vetria_free(handle) };
    }

    #[test]
    fn initialize_returns_before_slow_gate_answers() {
        // Accepts connections into the backlog and never replies.
        let silent = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = silent.local_addr().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            &dir,
            &format!(
                "[storage]\nbackend = \"memory\"\n\n[gate]\nendpoint = \"http://{}/gate\"\ntimeout_secs = 2\n",
                addr
            ),
        );
        let handle = unsafe { vetria_create(config.as_ptr()) };
        assert!(!handle.is_null());

        let started = Instant::now();
        assert!(emit(handle, "app/initialize", ""));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(matches!(phase(handle).as_str(), "idle" | "validating"));
        assert_eq!(
            read_json(handle, "app/presentation").unwrap()["mode"],
            "loading"
        );

        // The transport times out and the gate falls back to native.
        assert!(wait_until(|| phase(handle) == "useNative"));
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(wait_until(|| read_json(handle, "dashboard/counts").is_some()));

        unsafe { vetria_free(handle) };
        drop(silent);
    }

    #[test]
    fn bad_config_returns_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[storage]\nbackend = 7\n").unwrap();
        let path = CString::new(path.to_str().unwrap()).unwrap();
        assert!(unsafe { vetria_create(path.as_ptr()) }.is_null());
    }

    #[test]
    fn null_handles_are_tolerated() {
        let path = CString::new("gate/state").unwrap();
        let bytes = unsafe { vetria_get(std::ptr::null(), path.as_ptr()) };
        assert!(bytes.ptr.is_null());
        assert!(!unsafe { vetria_unsubscribe(std::ptr::null_mut(), 1) });
        unsafe { vetria_free(std::ptr::null_mut()) };
    }
}
