//! PostgreSQL implementation of delivery repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CostBreakdown, Delivery, DeliveryStatus, NewDelivery};
use crate::domain::repositories::DeliveryRepository;
use crate::error::AppError;

const DELIVERY_COLUMNS: &str = "id, order_id, distance_cost, weight_cost, surcharge, discount, \
     extra_fee, final_cost, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct DeliveryRow {
    id: i64,
    order_id: i64,
    distance_cost: Decimal,
    weight_cost: Decimal,
    surcharge: Decimal,
    discount: Decimal,
    extra_fee: Decimal,
    final_cost: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryRow> for Delivery {
    type Error = AppError;

    fn try_from(r: DeliveryRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<DeliveryStatus>()
            .map_err(|e| AppError::internal("Corrupted delivery row", Some(e.to_string())))?;

        let costs = CostBreakdown {
            distance_cost: r.distance_cost,
            weight_cost: r.weight_cost,
            surcharge: r.surcharge,
            discount: r.discount,
            extra_fee: r.extra_fee,
            final_cost: r.final_cost,
        };

        Ok(Delivery::new(
            r.id,
            r.order_id,
            costs,
            status,
            r.created_at,
            r.updated_at,
        ))
    }
}

/// PostgreSQL repository for delivery records.
pub struct PgDeliveryRepository {
    pool: Arc<PgPool>,
}

impl PgDeliveryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn collect_rows(rows: Vec<DeliveryRow>) -> Result<Vec<Delivery>, AppError> {
    rows.into_iter().map(Delivery::try_from).collect()
}

#[async_trait]
impl DeliveryRepository for PgDeliveryRepository {
    async fn create(&self, new_delivery: NewDelivery) -> Result<Delivery, AppError> {
        let sql = format!(
            r#"
            INSERT INTO deliveries (order_id, distance_cost, weight_cost, surcharge, discount,
                                    extra_fee, final_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DELIVERY_COLUMNS}
            "#
        );

        let costs = new_delivery.costs;
        let row = sqlx::query_as::<_, DeliveryRow>(&sql)
            .bind(new_delivery.order_id)
            .bind(costs.distance_cost)
            .bind(costs.weight_cost)
            .bind(costs.surcharge)
            .bind(costs.discount)
            .bind(costs.extra_fee)
            .bind(costs.final_cost)
            .bind(new_delivery.status.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Delivery>, AppError> {
        let sql = format!("SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE id = $1");

        let row = sqlx::query_as::<_, DeliveryRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Delivery::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Delivery>, AppError> {
        let sql = format!("SELECT {DELIVERY_COLUMNS} FROM deliveries ORDER BY id");

        let rows = sqlx::query_as::<_, DeliveryRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        collect_rows(rows)
    }

    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Delivery>, AppError> {
        let sql =
            format!("SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE order_id = $1 ORDER BY id");

        let rows = sqlx::query_as::<_, DeliveryRow>(&sql)
            .bind(order_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        collect_rows(rows)
    }

    async fn update(
        &self,
        id: i64,
        costs: CostBreakdown,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, AppError> {
        let sql = format!(
            r#"
            UPDATE deliveries
            SET distance_cost = $2, weight_cost = $3, surcharge = $4, discount = $5,
                extra_fee = $6, final_cost = $7, status = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {DELIVERY_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, DeliveryRow>(&sql)
            .bind(id)
            .bind(costs.distance_cost)
            .bind(costs.weight_cost)
            .bind(costs.surcharge)
            .bind(costs.discount)
            .bind(costs.extra_fee)
            .bind(costs.final_cost)
            .bind(status.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Delivery::try_from).transpose()
    }

    async fn update_status(&self, id: i64, status: DeliveryStatus) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE deliveries SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM deliveries WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_order(&self, order_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deliveries WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
