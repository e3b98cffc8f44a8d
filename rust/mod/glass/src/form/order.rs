use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{Checks, RecordForm, ValidationErrors, parse_decimal, parse_int, parse_tags};
use crate::model::{OrderRecord, order_total};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderForm {
    pub order_number: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub client_address: String,
    pub order_details: String,
    pub quantity: String,
    pub unit_price: String,

    /// Manual override; blank or unparsable falls back to the computed total.
    pub total_price: String,
    pub order_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub discount_percent: String,
    pub tax_percent: String,
    pub shipping_method: String,
    pub shipping_cost: String,
    pub special_instructions: String,
    pub handled_by: String,
    pub region: String,
    pub priority_level: String,
    pub confirmation_code: String,
    pub refund_eligible: bool,
    pub tags: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            order_number: String::new(),
            client_name: String::new(),
            client_phone: String::new(),
            client_email: String::new(),
            client_address: String::new(),
            order_details: String::new(),
            quantity: String::new(),
            unit_price: String::new(),
            total_price: String::new(),
            order_date: None,
            expected_delivery_date: None,
            status: "New".into(),
            payment_method: "Bank Transfer".into(),
            payment_status: "Pending".into(),
            discount_percent: "0.0".into(),
            tax_percent: "10.0".into(),
            shipping_method: "Ground".into(),
            shipping_cost: "0.0".into(),
            special_instructions: String::new(),
            handled_by: String::new(),
            region: "East".into(),
            priority_level: "Normal".into(),
            confirmation_code: String::new(),
            refund_eligible: true,
            tags: "client,new".into(),
        }
    }
}

impl OrderForm {
    /// Live total shown while the form is edited. Unparsable inputs count as 0.
    pub fn calculated_total(&self) -> f64 {
        order_total(
            parse_decimal(&self.quantity).unwrap_or_default(),
            parse_decimal(&self.unit_price).unwrap_or_default(),
            parse_decimal(&self.discount_percent).unwrap_or_default(),
            parse_decimal(&self.tax_percent).unwrap_or_default(),
            parse_decimal(&self.shipping_cost).unwrap_or_default(),
        )
    }
}

impl RecordForm for OrderForm {
    type Output = OrderRecord;

    fn validate(&self, now: DateTime<Utc>) -> Result<OrderRecord, ValidationErrors> {
        let mut checks = Checks::default();
        // Required order fields are checked as typed, without trimming.
        checks.check(!self.order_number.is_empty(), "Order Number is required.");
        checks.check(!self.client_name.is_empty(), "Client Name is required.");
        checks.check(
            self.client_phone.chars().count() >= 7,
            "Client Phone is invalid.",
        );
        checks.check(
            self.client_email.contains('@') && self.client_email.contains('.'),
            "Client Email is invalid.",
        );
        checks.check(
            !self.client_address.is_empty(),
            "Client Address is required.",
        );
        checks.check(
            !self.order_details.is_empty(),
            "Order Details are required.",
        );
        let quantity = parse_int(&self.quantity);
        let unit_price = parse_decimal(&self.unit_price);
        checks.check(
            quantity.is_some_and(|q| q > 0),
            "Quantity must be a positive number.",
        );
        checks.check(
            unit_price.is_some_and(|p| p > 0.0),
            "Unit Price must be a positive number.",
        );

        checks.finish(|| {
            let discount = parse_decimal(&self.discount_percent).unwrap_or_default();
            let tax = parse_decimal(&self.tax_percent).unwrap_or_default();
            let shipping = parse_decimal(&self.shipping_cost).unwrap_or_default();
            let quantity = quantity.unwrap_or_default();
            let unit_price = unit_price.unwrap_or_default();
            let total_price = parse_decimal(&self.total_price).unwrap_or_else(|| {
                order_total(quantity as f64, unit_price, discount, tax, shipping)
            });

            OrderRecord {
                id: Uuid::new_v4(),
                order_number: self.order_number.clone(),
                client_name: self.client_name.clone(),
                client_phone: self.client_phone.clone(),
                client_email: self.client_email.clone(),
                client_address: self.client_address.clone(),
                order_details: self.order_details.clone(),
                quantity,
                unit_price,
                total_price,
                order_date: self.order_date.unwrap_or(now),
                expected_delivery_date: self
                    .expected_delivery_date
                    .unwrap_or(now + Duration::days(3)),
                status: self.status.clone(),
                payment_method: self.payment_method.clone(),
                payment_status: self.payment_status.clone(),
                discount_percent: discount,
                tax_percent: tax,
                shipping_method: self.shipping_method.clone(),
                shipping_cost: shipping,
                special_instructions: self.special_instructions.clone(),
                handled_by: self.handled_by.clone(),
                region: self.region.clone(),
                priority_level: self.priority_level.clone(),
                confirmation_code: self.confirmation_code.clone(),
                refund_eligible: self.refund_eligible,
                tags: parse_tags(&self.tags),
            }
        })
    }
}
