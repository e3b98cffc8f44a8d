use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Collections, Record};

/// MaterialRecord: a raw material line held in stock (sand, soda ash, cullet...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: Uuid,
    pub name: String,

    /// Internal material code, e.g. "MAT-001".
    pub code: String,
    pub category: String,
    pub sub_category: String,
    pub supplier: String,
    pub supplier_contact: String,
    pub source_country: String,

    /// Quantity on hand, in `unit_type`.
    pub stock_level: i64,

    /// Stock level below which the material should be reordered.
    pub reorder_threshold: i64,
    pub purchase_price: f64,
    pub unit_type: String,
    pub color: String,
    pub density: f64,

    /// Degrees Celsius.
    pub melting_point: f64,
    pub toxicity_level: String,
    pub flammability: String,
    pub safety_notes: String,
    pub storage_location: String,
    pub received_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub quality_grade: String,
    pub batch_code: String,
    pub usage_count: i64,
    pub is_reusable: bool,
    pub tags: Vec<String>,
}

impl MaterialRecord {
    /// Stock has fallen below the reorder threshold.
    pub fn needs_reorder(&self) -> bool {
        self.stock_level < self.reorder_threshold
    }

    /// The dashboard's "Add Material" quick action.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "New Material".into(),
            code: String::new(),
            category: String::new(),
            sub_category: String::new(),
            supplier: String::new(),
            supplier_contact: String::new(),
            source_country: String::new(),
            stock_level: 0,
            reorder_threshold: 0,
            purchase_price: 0.0,
            unit_type: "kg".into(),
            color: String::new(),
            density: 0.0,
            melting_point: 0.0,
            toxicity_level: String::new(),
            flammability: String::new(),
            safety_notes: String::new(),
            storage_location: String::new(),
            received_date: now,
            expiry_date: now,
            quality_grade: String::new(),
            batch_code: String::new(),
            usage_count: 0,
            is_reusable: false,
            tags: Vec::new(),
        }
    }
}

impl Record for MaterialRecord {
    const COLLECTION: Collection = Collection::Materials;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.code.as_str(),
            self.supplier.as_str(),
            self.category.as_str(),
        ]
    }

    fn collection(all: &Collections) -> &Vec<Self> {
        &all.materials
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.materials
    }
}
