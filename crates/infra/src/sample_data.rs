//! Demo shop used to seed empty stores.
//!
//! Four customers and five orders covering the main rule paths: a cotton
//! shirt, a wool suit with embroidery, a silk dress, a silk saree and a
//! denim alteration job due in three days.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::json;

use sarthi_core::StoreResult;
use sarthi_orders::{Customer, Order, OrderStatus};

use crate::memory::{InMemoryCustomerStore, InMemoryOrderStore};
use crate::postgres::PostgresStore;

#[derive(Debug, Clone)]
pub struct SampleShop {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
}

struct SampleOrder {
    customer: usize,
    order_type: &'static str,
    fabric: &'static str,
    color: &'static str,
    quantity: u32,
    measurements: serde_json::Value,
    order_value: f64,
    advance_payment: f64,
    delivery_in_days: i64,
    status: OrderStatus,
    notes: &'static str,
}

impl SampleShop {
    /// Build the shop with delivery dates relative to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        let customers = vec![
            customer("Rajesh Kumar", "rajesh@example.com", "+91-9876543210", "123 MG Road", "Mumbai", "Maharashtra", "400001", "GST123456789"),
            customer("Priya Textiles", "info@priyatextiles.com", "+91-9876543211", "456 Commercial Street", "Bangalore", "Karnataka", "560001", "GST987654321"),
            customer("Mumbai Fabrics Ltd", "sales@mumbaifabrics.com", "+91-9876543212", "789 Textile Market", "Mumbai", "Maharashtra", "400002", "GST456789123"),
            customer("Silk Sarees Palace", "orders@silkpalace.com", "+91-9876543213", "321 Silk Market", "Chennai", "Tamil Nadu", "600001", "GST321654987"),
        ];

        let samples = [
            SampleOrder {
                customer: 0,
                order_type: "shirt",
                fabric: "cotton",
                color: "white",
                quantity: 2,
                measurements: json!({"chest": "40", "shoulder": "16", "length": "28", "sleeve": "24"}),
                order_value: 2500.0,
                advance_payment: 1000.0,
                delivery_in_days: 7,
                status: OrderStatus::InProgress,
                notes: "Premium cotton shirt with custom fit",
            },
            SampleOrder {
                customer: 1,
                order_type: "suit",
                fabric: "wool",
                color: "navy blue",
                quantity: 1,
                measurements: json!({"chest": "42", "waist": "36", "length": "30", "inseam": "32"}),
                order_value: 8500.0,
                advance_payment: 4000.0,
                delivery_in_days: 14,
                status: OrderStatus::Pending,
                notes: "Premium wool suit with complex tailoring and embroidery work",
            },
            SampleOrder {
                customer: 2,
                order_type: "dress",
                fabric: "silk",
                color: "maroon",
                quantity: 1,
                measurements: json!({"bust": "36", "waist": "30", "hips": "38", "length": "42"}),
                order_value: 4500.0,
                advance_payment: 2000.0,
                delivery_in_days: 10,
                status: OrderStatus::Pending,
                notes: "Silk dress with premium finishing",
            },
            SampleOrder {
                customer: 3,
                order_type: "saree",
                fabric: "silk",
                color: "red",
                quantity: 1,
                measurements: json!({"blouse_size": "36", "length": "6_yards"}),
                order_value: 6000.0,
                advance_payment: 3000.0,
                delivery_in_days: 5,
                status: OrderStatus::Pending,
                notes: "Traditional silk saree with blouse stitching and embroidery",
            },
            SampleOrder {
                customer: 0,
                order_type: "pant",
                fabric: "denim",
                color: "blue",
                quantity: 3,
                measurements: json!({"waist": "32", "inseam": "30", "length": "42"}),
                order_value: 1800.0,
                advance_payment: 500.0,
                delivery_in_days: 3,
                status: OrderStatus::Pending,
                notes: "Alteration services for existing pants",
            },
        ];

        let today = now.date_naive();
        let orders = samples
            .iter()
            .enumerate()
            .map(|(seq, sample)| sample.build(&customers[sample.customer], seq + 1, today, now))
            .collect();

        Self { customers, orders }
    }

    pub fn seed_in_memory(
        &self,
        customers: &InMemoryCustomerStore,
        orders: &InMemoryOrderStore,
    ) -> StoreResult<()> {
        for customer in &self.customers {
            customers.insert(customer.clone())?;
        }
        for order in &self.orders {
            orders.insert(order.clone())?;
        }
        tracing::info!(
            customers = self.customers.len(),
            orders = self.orders.len(),
            "seeded in-memory sample data"
        );
        Ok(())
    }

    pub async fn seed_postgres(&self, store: &PostgresStore) -> StoreResult<()> {
        for customer in &self.customers {
            store.upsert_customer(customer).await?;
        }
        for order in &self.orders {
            store.upsert_order(order).await?;
        }
        tracing::info!(
            customers = self.customers.len(),
            orders = self.orders.len(),
            "seeded postgres sample data"
        );
        Ok(())
    }
}

impl SampleOrder {
    fn build(&self, customer: &Customer, seq: usize, today: NaiveDate, now: DateTime<Utc>) -> Order {
        let mut order = Order::new(
            customer.id,
            customer.name.clone(),
            self.order_type,
            self.quantity,
            self.order_value,
        )
        .with_fabric(self.fabric)
        .with_color(self.color)
        .with_measurements(self.measurements.to_string())
        .with_notes(self.notes)
        .with_delivery_date(today + Duration::days(self.delivery_in_days));

        order.order_number = format!("ORD-{}-{seq:04}", today.format("%Y%m%d"));
        order.advance_payment = self.advance_payment;
        order.status = self.status;
        order.created_at = now;
        order
    }
}

#[allow(clippy::too_many_arguments)]
fn customer(
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    city: &str,
    state: &str,
    pincode: &str,
    gst_number: &str,
) -> Customer {
    let mut customer = Customer::new(name).with_postal_address(address, city, state, pincode);
    customer.email = Some(email.to_string());
    customer.phone = Some(phone.to_string());
    customer.gst_number = Some(gst_number.to_string());
    customer
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sarthi_orders::{CustomerStore, OrderStore};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn every_order_belongs_to_a_sample_customer() {
        let shop = SampleShop::new(now());
        assert_eq!(shop.customers.len(), 4);
        assert_eq!(shop.orders.len(), 5);
        for order in &shop.orders {
            let owner = shop.customers.iter().find(|c| c.id == order.customer_id).unwrap();
            assert_eq!(owner.name, order.customer_name);
        }
    }

    #[test]
    fn delivery_dates_are_relative_to_now() {
        let shop = SampleShop::new(now());
        let alteration = &shop.orders[4];
        assert_eq!(alteration.order_type, "pant");
        assert_eq!(
            alteration.delivery_date,
            NaiveDate::from_ymd_opt(2025, 6, 4)
        );
        assert_eq!(alteration.order_number, "ORD-20250601-0005");
    }

    #[tokio::test]
    async fn seeds_memory_stores() {
        let shop = SampleShop::new(now());
        let customers = InMemoryCustomerStore::new();
        let orders = InMemoryOrderStore::new();
        shop.seed_in_memory(&customers, &orders).unwrap();

        let suit = &shop.orders[1];
        assert_eq!(orders.get(suit.id).await.unwrap().as_ref(), Some(suit));
        assert!(customers.get(suit.customer_id).await.unwrap().is_some());
    }
}
