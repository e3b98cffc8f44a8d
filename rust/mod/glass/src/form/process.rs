use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{Checks, RecordForm, ValidationErrors, parse_decimal, parse_int, parse_tags};
use crate::model::ProcessRecord;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessForm {
    pub title: String,
    pub description: String,
    pub process_type: String,
    pub temperature: String,
    pub duration_minutes: String,
    pub pressure_level: String,
    pub tool_used: String,
    pub supervisor: String,
    pub batch_number: String,
    pub date_created: Option<DateTime<Utc>>,
    pub stage: String,
    pub safety_level: String,
    pub notes: String,
    pub quality_check_status: String,
    #[serde(rename = "energyUsedKWh")]
    pub energy_used_kwh: String,
    pub wastage_percent: String,
    pub color_type: String,
    #[serde(rename = "thicknessMM")]
    pub thickness_mm: String,
    pub clarity_rating: String,
    pub humidity_level: String,
    pub result_code: String,
    pub location: String,
    pub approval_status: String,
    pub maintenance_needed: bool,
    pub tags: String,
}

impl RecordForm for ProcessForm {
    type Output = ProcessRecord;

    fn validate(&self, now: DateTime<Utc>) -> Result<ProcessRecord, ValidationErrors> {
        let mut checks = Checks::default();
        for (value, label) in [
            (&self.title, "Title"),
            (&self.process_type, "Process Type"),
            (&self.temperature, "Temperature"),
            (&self.pressure_level, "Pressure Level"),
            (&self.tool_used, "Tool Used"),
            (&self.supervisor, "Supervisor"),
            (&self.batch_number, "Batch Number"),
            (&self.stage, "Stage"),
            (&self.safety_level, "Safety Level"),
            (&self.quality_check_status, "Quality Status"),
            (&self.color_type, "Color Type"),
            (&self.clarity_rating, "Clarity Rating"),
            (&self.humidity_level, "Humidity Level"),
            (&self.result_code, "Result Code"),
            (&self.location, "Location"),
            (&self.approval_status, "Approval Status"),
        ] {
            checks.require(value, label);
        }

        let duration = parse_int(&self.duration_minutes);
        let energy = parse_decimal(&self.energy_used_kwh);
        let wastage = parse_decimal(&self.wastage_percent);
        let thickness = parse_decimal(&self.thickness_mm);
        checks.check(duration.is_some(), "Duration must be a valid number.");
        checks.check(energy.is_some(), "Energy Used must be a valid number.");
        checks.check(wastage.is_some(), "Wastage % must be a valid number.");
        checks.check(thickness.is_some(), "Thickness (mm) must be a valid number.");

        checks.finish(|| ProcessRecord {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            description: self.description.clone(),
            process_type: self.process_type.clone(),
            temperature: self.temperature.clone(),
            duration_minutes: duration.unwrap_or_default(),
            pressure_level: self.pressure_level.clone(),
            tool_used: self.tool_used.clone(),
            supervisor: self.supervisor.clone(),
            batch_number: self.batch_number.clone(),
            date_created: self.date_created.unwrap_or(now),
            last_modified: now,
            stage: self.stage.clone(),
            safety_level: self.safety_level.clone(),
            notes: self.notes.clone(),
            quality_check_status: self.quality_check_status.clone(),
            energy_used_kwh: energy.unwrap_or_default(),
            wastage_percent: wastage.unwrap_or_default(),
            color_type: self.color_type.clone(),
            thickness_mm: thickness.unwrap_or_default(),
            clarity_rating: self.clarity_rating.clone(),
            humidity_level: self.humidity_level.clone(),
            result_code: self.result_code.clone(),
            location: self.location.clone(),
            approval_status: self.approval_status.clone(),
            maintenance_needed: self.maintenance_needed,
            tags: parse_tags(&self.tags),
        })
    }
}
