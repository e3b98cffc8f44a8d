//! Requests the native screens emit.
//!
//! Add forms are emitted as-is on `{collection}/add`; see `crate::form`.

use serde::Deserialize;
use uuid::Uuid;

use crate::model::Collection;

/// Start the session: run the gate, then load records if native.
#[derive(Debug, Clone, Default)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}

/// Remove one record: `{collection}/delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteReq {
    pub id: Uuid,
}

/// Filter a list screen: `{collection}/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchReq {
    pub query: String,
}

/// Dashboard quick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickAdd {
    Process,
    Material,
    Order,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickAddReq {
    pub kind: QuickAdd,
}

impl QuickAddReq {
    pub const PATH: &'static str = "dashboard/quick-add";
}

pub fn add_path(collection: Collection) -> String {
    format!("{}/add", collection.key())
}

pub fn delete_path(collection: Collection) -> String {
    format!("{}/delete", collection.key())
}

pub fn search_path(collection: Collection) -> String {
    format!("{}/search", collection.key())
}

/// Split `{collection}/{action}` into its parts.
pub fn parse_path(path: &str) -> Option<(Collection, &str)> {
    let (key, action) = path.split_once('/')?;
    Some((Collection::from_key(key)?, action))
}
