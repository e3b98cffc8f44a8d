//! UI-visible state published into Flux.
//!
//! Gate and presentation state live in `crate::gate`; everything the record
//! screens read is here.

use serde::Serialize;

use crate::labels::{FieldLabel, ProcessField};
use crate::model::{Collection, Collections};

/// Dashboard tile counts: stored at `dashboard/counts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub processes: usize,
    pub materials: usize,
    pub tasks: usize,
    pub orders: usize,
    pub deliveries: usize,
}

impl DashboardCounts {
    pub const PATH: &'static str = "dashboard/counts";

    pub fn of(all: &Collections) -> Self {
        Self {
            processes: all.len_of(Collection::Processes),
            materials: all.len_of(Collection::Materials),
            tasks: all.len_of(Collection::Tasks),
            orders: all.len_of(Collection::Orders),
            deliveries: all.len_of(Collection::Deliveries),
        }
    }
}

/// A collection's list screen: stored at `{collection}/list`.
///
/// `items` are the records matching `query`, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordList<T> {
    pub query: String,
    pub items: Vec<T>,
}

/// Result of the last add-form submission: stored at `{collection}/form`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    pub collection: Collection,
    pub ok: bool,

    /// Confirmation text on success, empty on failure.
    pub message: String,
    pub errors: Vec<String>,
}

impl FormOutcome {
    pub fn saved(collection: Collection, name: &str) -> Self {
        Self {
            collection,
            ok: true,
            message: format!("New {} '{}' was added.", collection.noun(), name),
            errors: Vec::new(),
        }
    }

    pub fn rejected(collection: Collection, errors: Vec<String>) -> Self {
        Self {
            collection,
            ok: false,
            message: String::new(),
            errors,
        }
    }
}

/// One row of the process detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessFieldRow {
    pub field: ProcessField,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Process field labels in display order: stored at `labels/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessLabels {
    pub rows: Vec<ProcessFieldRow>,
}

impl ProcessLabels {
    pub const PATH: &'static str = "labels/process";

    pub fn table() -> Self {
        let rows = ProcessField::ALL
            .into_iter()
            .map(|field| {
                let FieldLabel { label, icon } = field.label();
                ProcessFieldRow { field, label, icon }
            })
            .collect();
        Self { rows }
    }
}

pub fn list_path(collection: Collection) -> String {
    format!("{}/list", collection.key())
}

pub fn form_path(collection: Collection) -> String {
    format!("{}/form", collection.key())
}
