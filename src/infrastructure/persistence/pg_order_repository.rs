//! PostgreSQL implementation of order repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{DeliveryType, NewOrder, Order};
use crate::domain::repositories::OrderRepository;
use crate::error::AppError;
use crate::utils::db_error::is_restrict_violation_on;

/// Foreign key from `deliveries.order_id` to `orders.id`.
pub const DELIVERIES_ORDER_FK: &str = "deliveries_order_id_fkey";

const ORDER_COLUMNS: &str = "id, client_id, order_date, delivery_type, weight_kg, distance_km, \
     base_rate_per_km, base_rate_per_kg, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    client_id: i64,
    order_date: NaiveDate,
    delivery_type: String,
    weight_kg: Decimal,
    distance_km: Decimal,
    base_rate_per_km: Decimal,
    base_rate_per_kg: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        let fields = NewOrder {
            client_id: r.client_id,
            order_date: r.order_date,
            delivery_type: DeliveryType::from_label(&r.delivery_type),
            weight_kg: r.weight_kg,
            distance_km: r.distance_km,
            base_rate_per_km: r.base_rate_per_km,
            base_rate_per_kg: r.base_rate_per_kg,
        };
        Order::new(r.id, fields, r.created_at, r.updated_at)
    }
}

/// PostgreSQL repository for order records.
pub struct PgOrderRepository {
    pool: Arc<PgPool>,
}

impl PgOrderRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        let sql = format!(
            r#"
            INSERT INTO orders (client_id, order_date, delivery_type, weight_kg, distance_km,
                                base_rate_per_km, base_rate_per_kg)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(new_order.client_id)
            .bind(new_order.order_date)
            .bind(new_order.delivery_type.as_str())
            .bind(new_order.weight_kg)
            .bind(new_order.distance_km)
            .bind(new_order.base_rate_per_km)
            .bind(new_order.base_rate_per_kg)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Order::from))
    }

    async fn list(&self) -> Result<Vec<Order>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id");

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn update(&self, id: i64, fields: NewOrder) -> Result<Option<Order>, AppError> {
        let sql = format!(
            r#"
            UPDATE orders
            SET client_id = $2, order_date = $3, delivery_type = $4, weight_kg = $5,
                distance_km = $6, base_rate_per_km = $7, base_rate_per_kg = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(fields.client_id)
            .bind(fields.order_date)
            .bind(fields.delivery_type.as_str())
            .bind(fields.weight_kg)
            .bind(fields.distance_km)
            .bind(fields.base_rate_per_km)
            .bind(fields.base_rate_per_kg)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Order::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_restrict_violation_on(&e, DELIVERIES_ORDER_FK) => Err(AppError::integrity(
                "Cannot delete order: there are deliveries linked to this order",
                None,
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn count_by_client(&self, client_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
