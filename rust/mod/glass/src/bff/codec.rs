//! JSON mapping between Flux paths and their Rust types, for the platform
//! boundary. One branch per state type and per request type.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use vetria_flux::{Payload, StateValue};

use super::request::{DeleteReq, InitializeReq, QuickAddReq, SearchReq, parse_path};
use super::state::{DashboardCounts, FormOutcome, ProcessLabels, RecordList};
use crate::form::{DeliveryForm, MaterialForm, OrderForm, ProcessForm, TaskForm};
use crate::gate::{GateState, Presentation};
use crate::model::{
    Collection, DeliveryRecord, MaterialRecord, OrderRecord, ProcessRecord, TaskRecord,
};

fn encode<T: Serialize + 'static>(value: &StateValue) -> Option<Vec<u8>> {
    value
        .downcast_ref::<T>()
        .and_then(|v| serde_json::to_vec(v).ok())
}

/// Serialize the state at `path` to JSON. None for unknown paths or when
/// the stored value is not the path's type.
pub fn encode_state(path: &str, value: &StateValue) -> Option<Vec<u8>> {
    match path {
        GateState::PATH => return encode::<GateState>(value),
        Presentation::PATH => return encode::<Presentation>(value),
        DashboardCounts::PATH => return encode::<DashboardCounts>(value),
        ProcessLabels::PATH => return encode::<ProcessLabels>(value),
        _ => {}
    }

    let (collection, action) = parse_path(path)?;
    match action {
        "form" => encode::<FormOutcome>(value),
        "list" => match collection {
            Collection::Processes => encode::<RecordList<ProcessRecord>>(value),
            Collection::Materials => encode::<RecordList<MaterialRecord>>(value),
            Collection::Tasks => encode::<RecordList<TaskRecord>>(value),
            Collection::Orders => encode::<RecordList<OrderRecord>>(value),
            Collection::Deliveries => encode::<RecordList<DeliveryRecord>>(value),
        },
        _ => None,
    }
}

fn decode<T: DeserializeOwned + Send + Sync + 'static>(path: &str, json: &str) -> Option<Payload> {
    match serde_json::from_str::<T>(json) {
        Ok(req) => Some(Arc::new(req)),
        Err(e) => {
            warn!("{}: bad request payload: {}", path, e);
            None
        }
    }
}

/// Deserialize a JSON request body into the typed payload for `path`.
/// A blank body reads as `{}`.
pub fn decode_request(path: &str, json: &str) -> Option<Payload> {
    let json = if json.trim().is_empty() { "{}" } else { json };
    match path {
        InitializeReq::PATH => return Some(Arc::new(InitializeReq)),
        QuickAddReq::PATH => return decode::<QuickAddReq>(path, json),
        _ => {}
    }

    let (collection, action) = parse_path(path)?;
    match (action, collection) {
        ("delete", _) => decode::<DeleteReq>(path, json),
        ("search", _) => decode::<SearchReq>(path, json),
        ("add", Collection::Processes) => decode::<ProcessForm>(path, json),
        ("add", Collection::Materials) => decode::<MaterialForm>(path, json),
        ("add", Collection::Tasks) => decode::<TaskForm>(path, json),
        ("add", Collection::Orders) => decode::<OrderForm>(path, json),
        ("add", Collection::Deliveries) => decode::<DeliveryForm>(path, json),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn counts_encode_camel_case() {
        let value = StateValue::new(DashboardCounts {
            orders: 3,
            ..Default::default()
        });
        let json: serde_json::Value =
            serde_json::from_slice(&encode_state(DashboardCounts::PATH, &value).unwrap()).unwrap();
        assert_eq!(json["orders"], 3);
        assert_eq!(json["processes"], 0);
    }

    #[test]
    fn list_encodes_records() {
        let value = StateValue::new(RecordList {
            query: String::new(),
            items: vec![OrderRecord::placeholder(Utc::now(), 1234)],
        });
        let json: serde_json::Value =
            serde_json::from_slice(&encode_state("orders/list", &value).unwrap()).unwrap();
        assert_eq!(json["items"][0]["orderNumber"], "ORD-1234");
    }

    #[test]
    fn mismatched_or_unknown_state_is_none() {
        let value = StateValue::new(DashboardCounts::default());
        assert!(encode_state("orders/list", &value).is_none());
        assert!(encode_state("orders/unknown", &value).is_none());
        assert!(encode_state("nowhere", &value).is_none());
    }

    #[test]
    fn forms_decode_with_defaults() {
        let payload = decode_request("orders/add", r#"{"orderNumber":"ORD-7"}"#).unwrap();
        let form = payload.downcast_ref::<OrderForm>().unwrap();
        assert_eq!(form.order_number, "ORD-7");
        assert_eq!(form.tax_percent, "10.0");
    }

    #[test]
    fn blank_bodies() {
        let payload = decode_request("processes/search", "").unwrap();
        assert_eq!(payload.downcast_ref::<SearchReq>().unwrap().query, "");
        assert!(decode_request(InitializeReq::PATH, "").is_some());
        assert!(decode_request("orders/delete", "").is_none());
    }

    #[test]
    fn delete_needs_a_uuid() {
        assert!(decode_request("tasks/delete", r#"{"id":"nope"}"#).is_none());
        let id = uuid::Uuid::new_v4();
        let payload = decode_request("tasks/delete", &format!(r#"{{"id":"{}"}}"#, id)).unwrap();
        assert_eq!(payload.downcast_ref::<DeleteReq>().unwrap().id, id);
    }

    #[test]
    fn unknown_requests_are_none() {
        assert!(decode_request("orders/update", "{}").is_none());
        assert!(decode_request("invoices/add", "{}").is_none());
    }
}
