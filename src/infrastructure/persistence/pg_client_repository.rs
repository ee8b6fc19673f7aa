//! PostgreSQL implementation of client repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Client, ClientProfile};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;
use crate::utils::db_error::is_restrict_violation_on;

/// Foreign key from `orders.client_id` to `clients.id`.
pub const ORDERS_CLIENT_FK: &str = "orders_client_id_fkey";

const CLIENT_COLUMNS: &str = "id, name, surname, national_id, phone, email, street_type, street, \
     number, district, city, state, postal_code, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    surname: String,
    national_id: String,
    phone: String,
    email: String,
    street_type: String,
    street: String,
    number: String,
    district: String,
    city: String,
    state: String,
    postal_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(r: ClientRow) -> Self {
        let profile = ClientProfile {
            name: r.name,
            surname: r.surname,
            national_id: r.national_id,
            phone: r.phone,
            email: r.email,
            street_type: r.street_type,
            street: r.street,
            number: r.number,
            district: r.district,
            city: r.city,
            state: r.state,
            postal_code: r.postal_code,
        };
        Client::new(r.id, profile, r.created_at, r.updated_at)
    }
}

/// PostgreSQL repository for client records.
pub struct PgClientRepository {
    pool: Arc<PgPool>,
}

impl PgClientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create(&self, profile: ClientProfile) -> Result<Client, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clients (name, surname, national_id, phone, email, street_type,
                                 street, number, district, city, state, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {CLIENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(profile.name)
            .bind(profile.surname)
            .bind(profile.national_id)
            .bind(profile.phone)
            .bind(profile.email)
            .bind(profile.street_type)
            .bind(profile.street)
            .bind(profile.number)
            .bind(profile.district)
            .bind(profile.city)
            .bind(profile.state)
            .bind(profile.postal_code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");

        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Client::from))
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE national_id = $1");

        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(national_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Client::from))
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id");

        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn update(&self, id: i64, profile: ClientProfile) -> Result<Option<Client>, AppError> {
        let sql = format!(
            r#"
            UPDATE clients
            SET name = $2, surname = $3, national_id = $4, phone = $5, email = $6,
                street_type = $7, street = $8, number = $9, district = $10, city = $11,
                state = $12, postal_code = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id)
            .bind(profile.name)
            .bind(profile.surname)
            .bind(profile.national_id)
            .bind(profile.phone)
            .bind(profile.email)
            .bind(profile.street_type)
            .bind(profile.street)
            .bind(profile.number)
            .bind(profile.district)
            .bind(profile.city)
            .bind(profile.state)
            .bind(profile.postal_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Client::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            // An order was inserted after the dependency check ran.
            Err(e) if is_restrict_violation_on(&e, ORDERS_CLIENT_FK) => Err(AppError::integrity(
                "Cannot delete client: there are orders linked to this client",
                None,
            )),
            Err(e) => Err(e.into()),
        }
    }
}
