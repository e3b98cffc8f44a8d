use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{Checks, RecordForm, ValidationErrors, parse_decimal, parse_int, parse_tags};
use crate::model::DeliveryRecord;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliveryForm {
    pub delivery_number: String,
    pub driver_name: String,
    #[serde(rename = "vehicleID")]
    pub vehicle_id: String,
    pub license_plate: String,
    pub route_code: String,
    pub start_location: String,
    pub destination: String,
    #[serde(rename = "distanceKM")]
    pub distance_km: String,
    pub estimated_time_minutes: String,
    pub actual_time_minutes: String,
    pub fuel_used_liters: String,
    pub start_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub status: String,
    pub package_count: String,
    pub fragile_items: String,
    pub temperature_requirement: String,
    pub delivery_notes: String,
    pub receiver_name: String,
    pub receiver_signature: String,
    pub feedback_rating: String,
    pub issue_reported: bool,
    pub issue_description: String,
    pub completion_code: String,
    pub tags: String,
}

impl Default for DeliveryForm {
    fn default() -> Self {
        Self {
            delivery_number: String::new(),
            driver_name: String::new(),
            vehicle_id: String::new(),
            license_plate: String::new(),
            route_code: String::new(),
            start_location: String::new(),
            destination: String::new(),
            distance_km: String::new(),
            estimated_time_minutes: String::new(),
            actual_time_minutes: String::new(),
            fuel_used_liters: String::new(),
            start_date: None,
            delivery_date: None,
            is_delivered: false,
            status: "Pending".into(),
            package_count: String::new(),
            fragile_items: String::new(),
            temperature_requirement: "Ambient".into(),
            delivery_notes: String::new(),
            receiver_name: String::new(),
            receiver_signature: String::new(),
            feedback_rating: String::new(),
            issue_reported: false,
            issue_description: String::new(),
            completion_code: String::new(),
            tags: String::new(),
        }
    }
}

impl RecordForm for DeliveryForm {
    type Output = DeliveryRecord;

    fn validate(&self, now: DateTime<Utc>) -> Result<DeliveryRecord, ValidationErrors> {
        let mut checks = Checks::default();
        for (value, label) in [
            (&self.delivery_number, "Delivery Number"),
            (&self.driver_name, "Driver Name"),
            (&self.vehicle_id, "Vehicle ID"),
            (&self.license_plate, "License Plate"),
            (&self.route_code, "Route Code"),
            (&self.start_location, "Start Location"),
            (&self.destination, "Destination"),
            (&self.completion_code, "Completion Code"),
        ] {
            checks.require(value, label);
        }

        let distance = parse_decimal(&self.distance_km);
        let estimated = parse_int(&self.estimated_time_minutes);
        let actual = parse_int(&self.actual_time_minutes);
        let fuel = parse_decimal(&self.fuel_used_liters);
        let packages = parse_int(&self.package_count);
        let fragile = parse_int(&self.fragile_items);
        let rating = parse_int(&self.feedback_rating);
        checks.check(
            distance.is_some_and(|d| d > 0.0),
            "Distance (KM) must be a positive number.",
        );
        checks.check(
            estimated.is_some_and(|t| t > 0),
            "Estimated Time must be a positive integer.",
        );
        checks.check(
            actual.is_some_and(|t| t > 0),
            "Actual Time must be a positive integer.",
        );
        checks.check(
            fuel.is_some_and(|f| f > 0.0),
            "Fuel Used must be a positive number.",
        );
        checks.check(
            packages.is_some_and(|n| n >= 0),
            "Package Count must be a non-negative integer.",
        );
        checks.check(
            fragile.is_some_and(|n| n >= 0),
            "Fragile Items count must be a non-negative integer.",
        );
        checks.check(
            rating.is_some_and(|r| (1..=5).contains(&r)),
            "Feedback Rating must be an integer between 1 and 5.",
        );
        if self.issue_reported {
            checks.require_with(
                &self.issue_description,
                "Issue Description is required if an issue is reported.",
            );
        }

        checks.finish(|| DeliveryRecord {
            id: Uuid::new_v4(),
            delivery_number: self.delivery_number.clone(),
            driver_name: self.driver_name.clone(),
            vehicle_id: self.vehicle_id.clone(),
            license_plate: self.license_plate.clone(),
            route_code: self.route_code.clone(),
            start_location: self.start_location.clone(),
            destination: self.destination.clone(),
            distance_km: distance.unwrap_or_default(),
            estimated_time_minutes: estimated.unwrap_or_default(),
            actual_time_minutes: actual.unwrap_or_default(),
            fuel_used_liters: fuel.unwrap_or_default(),
            start_date: self.start_date.unwrap_or(now),
            delivery_date: self.delivery_date.unwrap_or(now + Duration::hours(1)),
            is_delivered: self.is_delivered,
            status: self.status.clone(),
            package_count: packages.unwrap_or_default(),
            fragile_items: fragile.unwrap_or_default(),
            temperature_requirement: self.temperature_requirement.clone(),
            delivery_notes: self.delivery_notes.clone(),
            receiver_name: self.receiver_name.clone(),
            receiver_signature: self.receiver_signature.clone(),
            feedback_rating: rating.unwrap_or_default(),
            issue_reported: self.issue_reported,
            issue_description: if self.issue_reported {
                self.issue_description.clone()
            } else {
                String::new()
            },
            completion_code: self.completion_code.clone(),
            tags: parse_tags(&self.tags),
        })
    }
}
