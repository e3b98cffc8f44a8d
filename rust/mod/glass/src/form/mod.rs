//! Add forms.
//!
//! A form holds raw input exactly as typed (numbers are still text) plus
//! picker, toggle and date values. `validate` runs every check, collects
//! every failure, and only builds a record when nothing failed.

mod delivery;
mod material;
mod order;
mod process;
mod task;

pub use delivery::DeliveryForm;
pub use material::MaterialForm;
pub use order::OrderForm;
pub use process::ProcessForm;
pub use task::TaskForm;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::Record;

/// Failed form checks, in the order they were run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", .messages.join("\n"))]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

/// A form that validates into a record of one collection.
pub trait RecordForm: DeserializeOwned + Send + Sync + 'static {
    type Output: Record;

    fn validate(&self, now: DateTime<Utc>) -> Result<Self::Output, ValidationErrors>;
}

/// Split comma-separated input into tags.
///
/// Empty pieces between commas are dropped; every other piece is trimmed,
/// so a whitespace-only piece becomes an empty tag.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.trim().to_string())
        .collect()
}

pub(crate) fn parse_int(input: &str) -> Option<i64> {
    input.parse().ok()
}

pub(crate) fn parse_decimal(input: &str) -> Option<f64> {
    input.parse().ok()
}

/// Accumulates check failures for one form submission.
#[derive(Default)]
pub(crate) struct Checks {
    messages: Vec<String>,
}

impl Checks {
    /// `"{label} is required."` when `value` is blank after trimming.
    pub fn require(&mut self, value: &str, label: &str) {
        self.require_with(value, &format!("{} is required.", label));
    }

    /// Records `message` when `value` is blank after trimming.
    pub fn require_with(&mut self, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(message);
        }
    }

    /// Records `message` unless `ok` holds.
    pub fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.fail(message);
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.messages.is_empty() {
            Ok(build())
        } else {
            Err(ValidationErrors {
                messages: self.messages,
            })
        }
    }
}
