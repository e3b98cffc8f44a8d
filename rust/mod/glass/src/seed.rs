//! Demonstration records written on first launch.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::model::{
    Collections, DeliveryRecord, MaterialRecord, OrderRecord, ProcessRecord, TaskRecord,
};

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One sample record per collection, timestamped relative to `now`.
pub fn demo_collections(now: DateTime<Utc>) -> Collections {
    Collections {
        processes: vec![ProcessRecord {
            id: Uuid::new_v4(),
            title: "Tempered Glass Heating".into(),
            description: "Heat glass at 620°C for strength.".into(),
            process_type: "Heating".into(),
            temperature: "620°C".into(),
            duration_minutes: 45,
            pressure_level: "Normal".into(),
            tool_used: "Furnace A2".into(),
            supervisor: "John Doe".into(),
            batch_number: "BATCH-001".into(),
            date_created: now,
            last_modified: now,
            stage: "Initial".into(),
            safety_level: "High".into(),
            notes: "Ensure slow cooling.".into(),
            quality_check_status: "Pending".into(),
            energy_used_kwh: 12.5,
            wastage_percent: 1.5,
            color_type: "Clear".into(),
            thickness_mm: 6.0,
            clarity_rating: "A+".into(),
            humidity_level: "30%".into(),
            result_code: "OK-001".into(),
            location: "Plant 1".into(),
            approval_status: "Approved".into(),
            maintenance_needed: false,
            tags: tags(&["heating", "tempered"]),
        }],
        materials: vec![MaterialRecord {
            id: Uuid::new_v4(),
            name: "Silica Sand".into(),
            code: "MAT-001".into(),
            category: "Base".into(),
            sub_category: "Primary".into(),
            supplier: "Crystal Supply Co.".into(),
            supplier_contact: "+1234567890".into(),
            source_country: "Australia".into(),
            stock_level: 2500,
            reorder_threshold: 500,
            purchase_price: 20.5,
            unit_type: "kg".into(),
            color: "White".into(),
            density: 2.65,
            melting_point: 1700.0,
            toxicity_level: "Low".into(),
            flammability: "None".into(),
            safety_notes: "Handle with mask.".into(),
            storage_location: "Warehouse A".into(),
            received_date: now,
            expiry_date: now + Duration::days(365),
            quality_grade: "A".into(),
            batch_code: "SAND-2025".into(),
            usage_count: 120,
            is_reusable: true,
            tags: tags(&["silica", "sand", "raw"]),
        }],
        tasks: vec![TaskRecord {
            id: Uuid::new_v4(),
            title: "Cutting Glass Sheets".into(),
            description: "Cut large sheets into standard sizes.".into(),
            assigned_to: "Michael".into(),
            department: "Cutting".into(),
            priority_level: "High".into(),
            due_date: now + Duration::days(1),
            created_date: now,
            start_time: now,
            end_time: now + Duration::hours(1),
            status: "In Progress".into(),
            progress_percent: 60,
            time_spent_minutes: 45,
            required_tools: tags(&["Cutter", "Safety Goggles"]),
            safety_compliance: true,
            remarks: "Good accuracy.".into(),
            supervisor_name: "Sara".into(),
            cost_estimate: 45.0,
            approval_required: true,
            approval_status: "Approved".into(),
            delay_reason: "None".into(),
            stage: "Mid".into(),
            outcome: "Smooth edges".into(),
            last_updated: now,
            reference_code: "TASK-001".into(),
            tags: tags(&["cutting", "process"]),
        }],
        orders: vec![OrderRecord {
            id: Uuid::new_v4(),
            order_number: "ORD-1001".into(),
            client_name: "BrightGlass Ltd".into(),
            client_phone: "+987654321".into(),
            client_email: "info@brightglass.com".into(),
            client_address: "123 Market Road".into(),
            order_details: "50 tempered glass sheets 6mm".into(),
            quantity: 50,
            unit_price: 25.0,
            // Stored as entered; not the computed total.
            total_price: 1250.0,
            order_date: now,
            expected_delivery_date: now + Duration::days(3),
            status: "Processing".into(),
            payment_method: "Cash".into(),
            payment_status: "Pending".into(),
            discount_percent: 5.0,
            tax_percent: 10.0,
            shipping_method: "Truck".into(),
            shipping_cost: 100.0,
            special_instructions: "Handle carefully".into(),
            handled_by: "Liam".into(),
            region: "Central".into(),
            priority_level: "Normal".into(),
            confirmation_code: "CONF-001".into(),
            refund_eligible: false,
            tags: tags(&["client", "order"]),
        }],
        deliveries: vec![DeliveryRecord {
            id: Uuid::new_v4(),
            delivery_number: "DEL-1001".into(),
            driver_name: "Alex".into(),
            vehicle_id: "VH-234".into(),
            license_plate: "XYZ-123".into(),
            route_code: "R001".into(),
            start_location: "Plant 1".into(),
            destination: "BrightGlass Ltd".into(),
            distance_km: 45.0,
            estimated_time_minutes: 60,
            actual_time_minutes: 58,
            fuel_used_liters: 5.5,
            start_date: now,
            delivery_date: now + Duration::hours(1),
            is_delivered: true,
            status: "Completed".into(),
            package_count: 50,
            fragile_items: 50,
            temperature_requirement: "Ambient".into(),
            delivery_notes: "Delivered without damage.".into(),
            receiver_name: "Daniel".into(),
            receiver_signature: "Daniel_Sign".into(),
            feedback_rating: 5,
            issue_reported: false,
            issue_description: String::new(),
            completion_code: "COMP-001".into(),
            tags: tags(&["delivery", "complete"]),
        }],
    }
}
