use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{Checks, RecordForm, ValidationErrors, parse_decimal, parse_int, parse_tags};
use crate::model::MaterialRecord;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialForm {
    pub name: String,
    pub code: String,
    pub category: String,
    pub sub_category: String,
    pub supplier: String,
    pub supplier_contact: String,
    pub source_country: String,
    pub stock_level: String,
    pub reorder_threshold: String,
    pub purchase_price: String,
    pub unit_type: String,
    pub color: String,
    pub density: String,
    pub melting_point: String,
    pub toxicity_level: String,
    pub flammability: String,
    pub safety_notes: String,
    pub storage_location: String,
    pub received_date: Option<DateTime<Utc>>,

    /// Defaults to a year after submission.
    pub expiry_date: Option<DateTime<Utc>>,
    pub quality_grade: String,
    pub batch_code: String,
    pub usage_count: String,
    pub is_reusable: bool,
    pub tags: String,
}

impl Default for MaterialForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            category: String::new(),
            sub_category: String::new(),
            supplier: String::new(),
            supplier_contact: String::new(),
            source_country: String::new(),
            stock_level: String::new(),
            reorder_threshold: String::new(),
            purchase_price: String::new(),
            unit_type: String::new(),
            color: String::new(),
            density: String::new(),
            melting_point: String::new(),
            toxicity_level: String::new(),
            flammability: String::new(),
            safety_notes: String::new(),
            storage_location: String::new(),
            received_date: None,
            expiry_date: None,
            quality_grade: "A".into(),
            batch_code: String::new(),
            usage_count: "0".into(),
            is_reusable: true,
            tags: String::new(),
        }
    }
}

impl RecordForm for MaterialForm {
    type Output = MaterialRecord;

    fn validate(&self, now: DateTime<Utc>) -> Result<MaterialRecord, ValidationErrors> {
        let mut checks = Checks::default();
        for (value, label) in [
            (&self.name, "Name"),
            (&self.code, "Code"),
            (&self.category, "Category"),
            (&self.sub_category, "Sub-Category"),
            (&self.supplier, "Supplier"),
            (&self.source_country, "Source Country"),
            (&self.unit_type, "Unit Type"),
            (&self.color, "Color"),
            (&self.toxicity_level, "Toxicity Level"),
            (&self.flammability, "Flammability"),
            (&self.storage_location, "Storage Location"),
            (&self.quality_grade, "Quality Grade"),
            (&self.batch_code, "Batch Code"),
        ] {
            checks.require(value, label);
        }

        let stock = parse_int(&self.stock_level);
        let threshold = parse_int(&self.reorder_threshold);
        let price = parse_decimal(&self.purchase_price);
        let density = parse_decimal(&self.density);
        let melting = parse_decimal(&self.melting_point);
        let usage = parse_int(&self.usage_count);
        checks.check(
            stock.is_some_and(|v| v >= 0),
            "Stock Level must be a non-negative number.",
        );
        checks.check(
            threshold.is_some_and(|v| v >= 0),
            "Reorder Threshold must be a non-negative number.",
        );
        checks.check(
            price.is_some_and(|v| v > 0.0),
            "Purchase Price must be a positive number.",
        );
        checks.check(
            density.is_some_and(|v| v > 0.0),
            "Density must be a positive number.",
        );
        checks.check(
            melting.is_some_and(|v| v > 0.0),
            "Melting Point must be a positive number.",
        );
        checks.check(
            usage.is_some_and(|v| v >= 0),
            "Usage Count must be a non-negative number.",
        );

        checks.finish(|| MaterialRecord {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            code: self.code.clone(),
            category: self.category.clone(),
            sub_category: self.sub_category.clone(),
            supplier: self.supplier.clone(),
            supplier_contact: self.supplier_contact.clone(),
            source_country: self.source_country.clone(),
            stock_level: stock.unwrap_or_default(),
            reorder_threshold: threshold.unwrap_or_default(),
            purchase_price: price.unwrap_or_default(),
            unit_type: self.unit_type.clone(),
            color: self.color.clone(),
            density: density.unwrap_or_default(),
            melting_point: melting.unwrap_or_default(),
            toxicity_level: self.toxicity_level.clone(),
            flammability: self.flammability.clone(),
            safety_notes: self.safety_notes.clone(),
            storage_location: self.storage_location.clone(),
            received_date: self.received_date.unwrap_or(now),
            expiry_date: self.expiry_date.unwrap_or(now + Duration::days(365)),
            quality_grade: self.quality_grade.clone(),
            batch_code: self.batch_code.clone(),
            usage_count: usage.unwrap_or_default(),
            is_reusable: self.is_reusable,
            tags: parse_tags(&self.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MaterialForm {
        MaterialForm {
            name: "Soda Ash".into(),
            code: "MAT-014".into(),
            category: "Flux".into(),
            sub_category: "Primary".into(),
            supplier: "Nordic Minerals".into(),
            source_country: "Sweden".into(),
            stock_level: "800".into(),
            reorder_threshold: "200".into(),
            purchase_price: "12.75".into(),
            unit_type: "kg".into(),
            color: "White".into(),
            density: "2.54".into(),
            melting_point: "851".into(),
            toxicity_level: "Low".into(),
            flammability: "None".into(),
            storage_location: "Warehouse B".into(),
            batch_code: "SODA-2025".into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_add_screen() {
        let form = MaterialForm::default();
        assert_eq!(form.quality_grade, "A");
        assert_eq!(form.usage_count, "0");
        assert!(form.is_reusable);
    }

    #[test]
    fn negative_stock_and_zero_price_fail() {
        let mut form = filled();
        form.stock_level = "-1".into();
        form.purchase_price = "0".into();
        let err = form.validate(Utc::now()).unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "Stock Level must be a non-negative number.",
                "Purchase Price must be a positive number.",
            ]
        );
    }

    #[test]
    fn valid_form_defaults_expiry_a_year_out() {
        let now = Utc::now();
        let record = filled().validate(now).unwrap();
        assert_eq!(record.expiry_date, now + Duration::days(365));
        assert_eq!(record.received_date, now);
        assert_eq!(record.usage_count, 0);
        assert!(!record.needs_reorder());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let form: MaterialForm = serde_json::from_str(r#"{"name":"Cullet"}"#).unwrap();
        assert_eq!(form.name, "Cullet");
        assert_eq!(form.quality_grade, "A");
    }
}
