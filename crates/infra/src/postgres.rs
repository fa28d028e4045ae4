//! Postgres-backed stores.
//!
//! One [`PostgresStore`] implements the order, customer and invoice store
//! traits over a shared pool.
//!
//! ## Error Mapping
//!
//! | SQLx error                       | `StoreError` |
//! |----------------------------------|--------------|
//! | Database, code `23505` (unique)  | `Conflict`   |
//! | Row decoding / column mismatch   | `Corrupt`    |
//! | Anything else                    | `Backend`    |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use sarthi_core::{CustomerId, InvoiceId, OrderId, StoreError, StoreResult};
use sarthi_invoicing::{InvoiceRecord, InvoiceStatus, InvoiceStore, NewInvoice};
use sarthi_orders::{Customer, CustomerStore, Order, OrderStatus, OrderStore};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        email       TEXT,
        phone       TEXT,
        address     TEXT,
        city        TEXT,
        state       TEXT,
        pincode     TEXT,
        gst_number  TEXT,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id               UUID PRIMARY KEY,
        order_number     TEXT NOT NULL,
        customer_id      UUID NOT NULL REFERENCES customers (id),
        customer_name    TEXT NOT NULL,
        order_type       TEXT NOT NULL,
        fabric           TEXT,
        color            TEXT,
        quantity         INTEGER NOT NULL CHECK (quantity >= 0),
        measurements     TEXT,
        order_value      DOUBLE PRECISION NOT NULL,
        advance_payment  DOUBLE PRECISION NOT NULL DEFAULT 0,
        delivery_date    DATE,
        status           TEXT NOT NULL,
        notes            TEXT,
        created_at       TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id              UUID PRIMARY KEY,
        invoice_number  TEXT NOT NULL UNIQUE,
        order_id        UUID NOT NULL REFERENCES orders (id),
        customer_id     UUID NOT NULL REFERENCES customers (id),
        amount          DOUBLE PRECISION NOT NULL,
        tax_amount      DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_amount    DOUBLE PRECISION NOT NULL,
        status          TEXT NOT NULL,
        due_date        DATE,
        paid_date       DATE,
        payment_method  TEXT,
        notes           TEXT NOT NULL DEFAULT '',
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS invoices_order_id_idx ON invoices (order_id)",
];

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    /// Insert or replace a customer.
    pub async fn upsert_customer(&self, customer: &Customer) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, address, city, state, pincode, gst_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                gst_number = EXCLUDED.gst_number
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.pincode)
        .bind(&customer.gst_number)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_customer", e))?;
        Ok(())
    }

    /// Insert or replace an order.
    pub async fn upsert_order(&self, order: &Order) -> StoreResult<()> {
        let quantity = i32::try_from(order.quantity)
            .map_err(|_| StoreError::corrupt(format!("quantity {} out of range", order.quantity)))?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, customer_id, customer_name, order_type, fabric, color,
                quantity, measurements, order_value, advance_payment, delivery_date,
                status, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                order_number = EXCLUDED.order_number,
                customer_id = EXCLUDED.customer_id,
                customer_name = EXCLUDED.customer_name,
                order_type = EXCLUDED.order_type,
                fabric = EXCLUDED.fabric,
                color = EXCLUDED.color,
                quantity = EXCLUDED.quantity,
                measurements = EXCLUDED.measurements,
                order_value = EXCLUDED.order_value,
                advance_payment = EXCLUDED.advance_payment,
                delivery_date = EXCLUDED.delivery_date,
                status = EXCLUDED.status,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.order_number)
        .bind(order.customer_id.as_uuid())
        .bind(&order.customer_name)
        .bind(&order.order_type)
        .bind(&order.fabric)
        .bind(&order.color)
        .bind(quantity)
        .bind(&order.measurements)
        .bind(order.order_value)
        .bind(order.advance_payment)
        .bind(order.delivery_date)
        .bind(order.status.as_str())
        .bind(&order.notes)
        .bind(order.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_order", e))?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    #[instrument(skip_all, fields(order_id = %order_id), err)]
    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, customer_id, customer_name, order_type, fabric, color,
                   quantity, measurements, order_value, advance_payment, delivery_date,
                   status, notes, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_order", e))?;

        row.as_ref().map(order_from_row).transpose()
    }
}

#[async_trait]
impl CustomerStore for PostgresStore {
    #[instrument(skip_all, fields(customer_id = %customer_id), err)]
    async fn get(&self, customer_id: CustomerId) -> StoreResult<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, address, city, state, pincode, gst_number
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_customer", e))?;

        row.as_ref().map(customer_from_row).transpose()
    }
}

const INVOICE_COLUMNS: &str = "id, invoice_number, order_id, customer_id, amount, tax_amount, \
     total_amount, status, due_date, paid_date, payment_method, notes, created_at";

#[async_trait]
impl InvoiceStore for PostgresStore {
    /// The insert runs in its own transaction: either the record is committed
    /// whole or nothing is written.
    #[instrument(skip_all, fields(invoice_number = %invoice.invoice_number), err)]
    async fn create(&self, invoice: NewInvoice) -> StoreResult<InvoiceRecord> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let id = InvoiceId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO invoices (
                id, invoice_number, order_id, customer_id, amount, tax_amount,
                total_amount, status, due_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&invoice.invoice_number)
        .bind(invoice.order_id.as_uuid())
        .bind(invoice.customer_id.as_uuid())
        .bind(invoice.amount)
        .bind(invoice.tax_amount)
        .bind(invoice.total_amount)
        .bind(invoice.status.as_str())
        .bind(invoice.due_date)
        .bind(&invoice.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_invoice", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(invoice.into_record(id, created_at))
    }

    async fn find_by_order(&self, order_id: OrderId) -> StoreResult<Option<InvoiceRecord>> {
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE order_id = $1 ORDER BY created_at ASC LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(order_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_invoice_by_order", e))?;

        row.as_ref().map(invoice_from_row).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<InvoiceRecord>> {
        let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_invoices", e))?;

        rows.iter().map(invoice_from_row).collect()
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> StoreResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::corrupt(format!("column {name}: {e}")))
}

fn order_from_row(row: &PgRow) -> StoreResult<Order> {
    let quantity: i32 = column(row, "quantity")?;
    let status: String = column(row, "status")?;

    Ok(Order {
        id: OrderId::from_uuid(column::<Uuid>(row, "id")?),
        order_number: column(row, "order_number")?,
        customer_id: CustomerId::from_uuid(column::<Uuid>(row, "customer_id")?),
        customer_name: column(row, "customer_name")?,
        order_type: column(row, "order_type")?,
        fabric: column(row, "fabric")?,
        color: column(row, "color")?,
        quantity: u32::try_from(quantity)
            .map_err(|_| StoreError::corrupt(format!("negative quantity {quantity}")))?,
        measurements: column(row, "measurements")?,
        order_value: column(row, "order_value")?,
        advance_payment: column(row, "advance_payment")?,
        delivery_date: column::<Option<NaiveDate>>(row, "delivery_date")?,
        status: OrderStatus::parse(&status)
            .ok_or_else(|| StoreError::corrupt(format!("unknown order status {status:?}")))?,
        notes: column(row, "notes")?,
        created_at: column(row, "created_at")?,
    })
}

fn customer_from_row(row: &PgRow) -> StoreResult<Customer> {
    Ok(Customer {
        id: CustomerId::from_uuid(column::<Uuid>(row, "id")?),
        name: column(row, "name")?,
        email: column(row, "email")?,
        phone: column(row, "phone")?,
        address: column(row, "address")?,
        city: column(row, "city")?,
        state: column(row, "state")?,
        pincode: column(row, "pincode")?,
        gst_number: column(row, "gst_number")?,
    })
}

fn invoice_from_row(row: &PgRow) -> StoreResult<InvoiceRecord> {
    let status: String = column(row, "status")?;

    Ok(InvoiceRecord {
        id: InvoiceId::from_uuid(column::<Uuid>(row, "id")?),
        invoice_number: column(row, "invoice_number")?,
        order_id: OrderId::from_uuid(column::<Uuid>(row, "order_id")?),
        customer_id: CustomerId::from_uuid(column::<Uuid>(row, "customer_id")?),
        amount: column(row, "amount")?,
        tax_amount: column(row, "tax_amount")?,
        total_amount: column(row, "total_amount")?,
        status: InvoiceStatus::parse(&status)
            .ok_or_else(|| StoreError::corrupt(format!("unknown invoice status {status:?}")))?,
        due_date: column(row, "due_date")?,
        paid_date: column(row, "paid_date")?,
        payment_method: column(row, "payment_method")?,
        notes: column(row, "notes")?,
        created_at: column(row, "created_at")?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {operation}: {}", db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(format!("decode error in {operation}: {err}"))
        }
        sqlx::Error::PoolClosed => StoreError::Backend(format!("connection pool closed in {operation}")),
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}
