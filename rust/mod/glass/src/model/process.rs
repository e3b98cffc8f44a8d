use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Collections, Record};

/// ProcessRecord: one run of a furnace, cutting, or coating process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    /// Heating, Cooling, Cutting, Coating, ...
    pub process_type: String,

    /// Free-form, e.g. "620°C".
    pub temperature: String,
    pub duration_minutes: i64,
    pub pressure_level: String,
    pub tool_used: String,
    pub supervisor: String,
    pub batch_number: String,
    pub date_created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub stage: String,
    pub safety_level: String,
    pub notes: String,
    pub quality_check_status: String,

    #[serde(rename = "energyUsedKWh")]
    pub energy_used_kwh: f64,
    pub wastage_percent: f64,
    pub color_type: String,

    #[serde(rename = "thicknessMM")]
    pub thickness_mm: f64,
    pub clarity_rating: String,
    pub humidity_level: String,
    pub result_code: String,
    pub location: String,
    pub approval_status: String,
    pub maintenance_needed: bool,
    pub tags: Vec<String>,
}

impl Record for ProcessRecord {
    const COLLECTION: Collection = Collection::Processes;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.batch_number.as_str(), self.supervisor.as_str()]
    }

    fn collection(all: &Collections) -> &Vec<Self> {
        &all.processes
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.processes
    }
}

impl ProcessRecord {
    /// The dashboard's "New Process" quick action: a titled record with every
    /// other field blank.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "New Process".into(),
            description: String::new(),
            process_type: String::new(),
            temperature: String::new(),
            duration_minutes: 0,
            pressure_level: String::new(),
            tool_used: String::new(),
            supervisor: String::new(),
            batch_number: String::new(),
            date_created: now,
            last_modified: now,
            stage: String::new(),
            safety_level: String::new(),
            notes: String::new(),
            quality_check_status: String::new(),
            energy_used_kwh: 0.0,
            wastage_percent: 0.0,
            color_type: String::new(),
            thickness_mm: 0.0,
            clarity_rating: String::new(),
            humidity_level: String::new(),
            result_code: String::new(),
            location: String::new(),
            approval_status: String::new(),
            maintenance_needed: false,
            tags: Vec::new(),
        }
    }
}
