use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Collections, Record};

/// TaskRecord: a unit of shop-floor work assigned to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub department: String,
    pub priority_level: String,
    pub due_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,

    /// 0..=100.
    pub progress_percent: i64,
    pub time_spent_minutes: i64,
    pub required_tools: Vec<String>,
    pub safety_compliance: bool,
    pub remarks: String,
    pub supervisor_name: String,
    pub cost_estimate: f64,
    pub approval_required: bool,
    pub approval_status: String,
    pub delay_reason: String,
    pub stage: String,
    pub outcome: String,
    pub last_updated: DateTime<Utc>,
    pub reference_code: String,
    pub tags: Vec<String>,
}

impl Record for TaskRecord {
    const COLLECTION: Collection = Collection::Tasks;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.assigned_to.as_str(),
            self.reference_code.as_str(),
        ]
    }

    fn collection(all: &Collections) -> &Vec<Self> {
        &all.tasks
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.tasks
    }
}
