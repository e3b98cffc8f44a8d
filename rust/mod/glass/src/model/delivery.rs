use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Collections, Record};

/// DeliveryRecord: one truck run from the plant to a client site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub id: Uuid,
    pub delivery_number: String,
    pub driver_name: String,

    #[serde(rename = "vehicleID")]
    pub vehicle_id: String,
    pub license_plate: String,
    pub route_code: String,
    pub start_location: String,
    pub destination: String,

    #[serde(rename = "distanceKM")]
    pub distance_km: f64,
    pub estimated_time_minutes: i64,
    pub actual_time_minutes: i64,
    pub fuel_used_liters: f64,
    pub start_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub is_delivered: bool,
    pub status: String,
    pub package_count: i64,
    pub fragile_items: i64,
    pub temperature_requirement: String,
    pub delivery_notes: String,
    pub receiver_name: String,
    pub receiver_signature: String,

    /// 1..=5.
    pub feedback_rating: i64,
    pub issue_reported: bool,

    /// Empty unless `issue_reported`.
    pub issue_description: String,
    pub completion_code: String,
    pub tags: Vec<String>,
}

impl Record for DeliveryRecord {
    const COLLECTION: Collection = Collection::Deliveries;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.delivery_number
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.driver_name.as_str(),
            self.delivery_number.as_str(),
            self.destination.as_str(),
        ]
    }

    fn collection(all: &Collections) -> &Vec<Self> {
        &all.deliveries
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.deliveries
    }
}
