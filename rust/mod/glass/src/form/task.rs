use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{Checks, RecordForm, ValidationErrors, parse_decimal, parse_int, parse_tags};
use crate::model::TaskRecord;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub department: String,
    pub priority_level: String,
    pub due_date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub progress_percent: String,
    pub time_spent_minutes: String,

    /// Comma-separated, parsed like tags.
    pub required_tools: String,
    pub safety_compliance: bool,
    pub remarks: String,
    pub supervisor_name: String,
    pub cost_estimate: String,
    pub approval_required: bool,
    pub approval_status: String,
    pub delay_reason: String,
    pub stage: String,
    pub outcome: String,
    pub reference_code: String,
    pub tags: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            assigned_to: String::new(),
            department: String::new(),
            priority_level: "Medium".into(),
            due_date: None,
            start_time: None,
            end_time: None,
            status: "Scheduled".into(),
            progress_percent: "0".into(),
            time_spent_minutes: "0".into(),
            required_tools: String::new(),
            safety_compliance: true,
            remarks: String::new(),
            supervisor_name: String::new(),
            cost_estimate: "0.0".into(),
            approval_required: false,
            approval_status: "Pending".into(),
            delay_reason: "None".into(),
            stage: "Initial".into(),
            outcome: "N/A".into(),
            reference_code: String::new(),
            tags: String::new(),
        }
    }
}

impl RecordForm for TaskForm {
    type Output = TaskRecord;

    fn validate(&self, now: DateTime<Utc>) -> Result<TaskRecord, ValidationErrors> {
        let mut checks = Checks::default();
        checks.require(&self.title, "Title");
        checks.require(&self.assigned_to, "Assignee");
        checks.require(&self.department, "Department");
        checks.require(&self.reference_code, "Reference Code");

        // Unparsable progress is not an error; it is stored as 0.
        let progress = parse_int(&self.progress_percent);
        checks.check(
            progress.is_none_or(|p| (0..=100).contains(&p)),
            "Progress must be between 0 and 100.",
        );
        let cost = parse_decimal(&self.cost_estimate);
        checks.check(cost.is_some(), "Cost Estimate must be a valid number.");
        let spent = parse_int(&self.time_spent_minutes);
        checks.check(spent.is_some(), "Time Spent must be a valid integer.");

        checks.finish(|| TaskRecord {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            department: self.department.clone(),
            priority_level: self.priority_level.clone(),
            due_date: self.due_date.unwrap_or(now + Duration::days(1)),
            created_date: now,
            start_time: self.start_time.unwrap_or(now),
            end_time: self.end_time.unwrap_or(now + Duration::hours(1)),
            status: self.status.clone(),
            progress_percent: progress.unwrap_or_default(),
            time_spent_minutes: spent.unwrap_or_default(),
            required_tools: parse_tags(&self.required_tools),
            safety_compliance: self.safety_compliance,
            remarks: self.remarks.clone(),
            supervisor_name: self.supervisor_name.clone(),
            cost_estimate: cost.unwrap_or_default(),
            approval_required: self.approval_required,
            approval_status: self.approval_status.clone(),
            delay_reason: self.delay_reason.clone(),
            stage: self.stage.clone(),
            outcome: self.outcome.clone(),
            last_updated: now,
            reference_code: self.reference_code.clone(),
            tags: parse_tags(&self.tags),
        })
    }
}
