//! Display labels for process fields.
//!
//! The process detail screen lists every field as a (label, icon) row. The
//! mapping is a fixed table; icon names are platform symbol identifiers the
//! shell resolves itself.

use serde::{Deserialize, Serialize};

/// Label and icon for one field row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldLabel {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Every field of a `ProcessRecord`, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessField {
    Id,
    Title,
    Description,
    ProcessType,
    Temperature,
    DurationMinutes,
    PressureLevel,
    ToolUsed,
    Supervisor,
    BatchNumber,
    DateCreated,
    LastModified,
    Stage,
    SafetyLevel,
    Notes,
    QualityCheckStatus,
    EnergyUsedKwh,
    WastagePercent,
    ColorType,
    ThicknessMm,
    ClarityRating,
    HumidityLevel,
    ResultCode,
    Location,
    ApprovalStatus,
    MaintenanceNeeded,
    Tags,
}

impl ProcessField {
    pub const ALL: [ProcessField; 27] = [
        ProcessField::Id,
        ProcessField::Title,
        ProcessField::Description,
        ProcessField::ProcessType,
        ProcessField::Temperature,
        ProcessField::DurationMinutes,
        ProcessField::PressureLevel,
        ProcessField::ToolUsed,
        ProcessField::Supervisor,
        ProcessField::BatchNumber,
        ProcessField::DateCreated,
        ProcessField::LastModified,
        ProcessField::Stage,
        ProcessField::SafetyLevel,
        ProcessField::Notes,
        ProcessField::QualityCheckStatus,
        ProcessField::EnergyUsedKwh,
        ProcessField::WastagePercent,
        ProcessField::ColorType,
        ProcessField::ThicknessMm,
        ProcessField::ClarityRating,
        ProcessField::HumidityLevel,
        ProcessField::ResultCode,
        ProcessField::Location,
        ProcessField::ApprovalStatus,
        ProcessField::MaintenanceNeeded,
        ProcessField::Tags,
    ];

    pub fn label(self) -> FieldLabel {
        let (label, icon) = match self {
            ProcessField::Id => ("Identifier", "number"),
            ProcessField::Title => ("Title", "text.badge.checkmark"),
            ProcessField::Description => ("Description", "note.text"),
            ProcessField::ProcessType => ("Process Type", "gearshape.2"),
            ProcessField::Temperature => ("Temperature", "thermometer"),
            ProcessField::DurationMinutes => ("Duration (min)", "clock"),
            ProcessField::PressureLevel => ("Pressure Level", "gauge"),
            ProcessField::ToolUsed => ("Tool Used", "wrench.and.screwdriver"),
            ProcessField::Supervisor => ("Supervisor", "person.crop.square"),
            ProcessField::BatchNumber => ("Batch Number", "tag"),
            ProcessField::DateCreated => ("Date Created", "calendar.badge.plus"),
            ProcessField::LastModified => ("Last Modified", "pencil.and.ruler"),
            ProcessField::Stage => ("Stage", "chart.bar"),
            ProcessField::SafetyLevel => ("Safety Level", "cross.case"),
            ProcessField::Notes => ("Notes", "note.text"),
            ProcessField::QualityCheckStatus => ("Quality Status", "staroflife"),
            ProcessField::EnergyUsedKwh => ("Energy Used (kWh)", "bolt"),
            ProcessField::WastagePercent => ("Wastage (%)", "trash"),
            ProcessField::ColorType => ("Color Type", "paintpalette"),
            ProcessField::ThicknessMm => ("Thickness (mm)", "ruler"),
            ProcessField::ClarityRating => ("Clarity Rating", "sparkle"),
            ProcessField::HumidityLevel => ("Humidity Level", "humidity"),
            ProcessField::ResultCode => ("Result Code", "barcode"),
            ProcessField::Location => ("Location", "location.circle"),
            ProcessField::ApprovalStatus => ("Approval Status", "hand.thumbsup"),
            ProcessField::MaintenanceNeeded => ("Maintenance Needed", "screwdriver"),
            ProcessField::Tags => ("Tags", "folder.fill"),
        };
        FieldLabel { label, icon }
    }
}
