use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sarthi_core::{CustomerId, Entity, OrderId};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "in_progress" => Some(OrderStatus::InProgress),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// A tailoring order as recorded by the shop.
///
/// Free-text fields are optional; consumers treat a missing value as an empty
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_id: CustomerId,
    /// Denormalized customer name as captured when the order was taken.
    pub customer_name: String,
    /// Garment or service kind ("shirt", "suit", "saree", ...).
    pub order_type: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    /// Raw JSON text of the customer's measurements.
    pub measurements: Option<String>,
    pub order_value: f64,
    pub advance_payment: f64,
    pub delivery_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Start a pending order with the required fields; everything else is empty.
    pub fn new(
        customer_id: CustomerId,
        customer_name: impl Into<String>,
        order_type: impl Into<String>,
        quantity: u32,
        order_value: f64,
    ) -> Self {
        Self {
            id: OrderId::new(),
            order_number: String::new(),
            customer_id,
            customer_name: customer_name.into(),
            order_type: order_type.into(),
            fabric: None,
            color: None,
            quantity,
            measurements: None,
            order_value,
            advance_payment: 0.0,
            delivery_date: None,
            status: OrderStatus::Pending,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_fabric(mut self, fabric: impl Into<String>) -> Self {
        self.fabric = Some(fabric.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_delivery_date(mut self, delivery_date: NaiveDate) -> Self {
        self.delivery_date = Some(delivery_date);
        self
    }

    pub fn with_measurements(mut self, measurements_json: impl Into<String>) -> Self {
        self.measurements = Some(measurements_json.into());
        self
    }

    pub fn fabric_or_empty(&self) -> &str {
        self.fabric.as_deref().unwrap_or("")
    }

    pub fn color_or_empty(&self) -> &str {
        self.color.as_deref().unwrap_or("")
    }

    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_fields_read_as_empty() {
        let order = Order::new(CustomerId::new(), "Asha", "kurta", 1, 1200.0);
        assert_eq!(order.fabric_or_empty(), "");
        assert_eq!(order.color_or_empty(), "");
        assert_eq!(order.notes_or_empty(), "");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }
}
