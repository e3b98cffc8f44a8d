use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Collections, Record};

/// OrderRecord: a client's order for finished glass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: Uuid,

    /// e.g. "ORD-1001".
    pub order_number: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub client_address: String,
    pub order_details: String,
    pub quantity: i64,
    pub unit_price: f64,

    /// Stored total. Normally `order_total(...)` of the fields below, but the
    /// add form lets the user override it.
    pub total_price: f64,
    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: DateTime<Utc>,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub discount_percent: f64,
    pub tax_percent: f64,
    pub shipping_method: String,
    pub shipping_cost: f64,
    pub special_instructions: String,
    pub handled_by: String,
    pub region: String,
    pub priority_level: String,
    pub confirmation_code: String,
    pub refund_eligible: bool,
    pub tags: Vec<String>,
}

/// subtotal * (1 - discount/100) * (1 + tax/100) + shipping
pub fn order_total(
    quantity: f64,
    unit_price: f64,
    discount_percent: f64,
    tax_percent: f64,
    shipping_cost: f64,
) -> f64 {
    let subtotal = quantity * unit_price;
    let discounted = subtotal * (1.0 - discount_percent / 100.0);
    let taxed = discounted * (1.0 + tax_percent / 100.0);
    taxed + shipping_cost
}

impl OrderRecord {
    /// Total recomputed from quantity, price, discount, tax and shipping.
    pub fn computed_total(&self) -> f64 {
        order_total(
            self.quantity as f64,
            self.unit_price,
            self.discount_percent,
            self.tax_percent,
            self.shipping_cost,
        )
    }

    /// The dashboard's "New Order" quick action. `serial` fills the
    /// `ORD-nnnn` number.
    pub fn placeholder(now: DateTime<Utc>, serial: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_number: format!("ORD-{}", serial),
            client_name: "New Client".into(),
            client_phone: String::new(),
            client_email: String::new(),
            client_address: String::new(),
            order_details: String::new(),
            quantity: 0,
            unit_price: 0.0,
            total_price: 0.0,
            order_date: now,
            expected_delivery_date: now,
            status: String::new(),
            payment_method: String::new(),
            payment_status: String::new(),
            discount_percent: 0.0,
            tax_percent: 0.0,
            shipping_method: String::new(),
            shipping_cost: 0.0,
            special_instructions: String::new(),
            handled_by: String::new(),
            region: String::new(),
            priority_level: String::new(),
            confirmation_code: String::new(),
            refund_eligible: false,
            tags: Vec::new(),
        }
    }
}

impl Record for OrderRecord {
    const COLLECTION: Collection = Collection::Orders;

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.order_number
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.order_number.as_str(),
            self.client_name.as_str(),
            self.status.as_str(),
        ]
    }

    fn collection(all: &Collections) -> &Vec<Self> {
        &all.orders
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.orders
    }
}
