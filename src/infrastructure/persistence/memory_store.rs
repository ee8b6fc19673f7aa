//! In-process store implementing every repository trait.
//!
//! All three tables sit behind a single lock so the delete checks and the
//! unique national id check see a consistent snapshot, mirroring the
//! `ON DELETE RESTRICT` and `UNIQUE` constraints of the PostgreSQL schema.
//! Contents are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Client, ClientProfile, CostBreakdown, Delivery, DeliveryStatus, NewDelivery, NewOrder, Order,
};
use crate::domain::repositories::{ClientRepository, DeliveryRepository, OrderRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    clients: BTreeMap<i64, Client>,
    orders: BTreeMap<i64, Order>,
    deliveries: BTreeMap<i64, Delivery>,
    last_client_id: i64,
    last_order_id: i64,
    last_delivery_id: i64,
}

impl Tables {
    fn national_id_taken(&self, national_id: &str, except: Option<i64>) -> bool {
        self.clients
            .values()
            .any(|c| c.profile.national_id == national_id && Some(c.id) != except)
    }

    fn orders_of(&self, client_id: i64) -> i64 {
        self.orders
            .values()
            .filter(|o| o.fields.client_id == client_id)
            .count() as i64
    }

    fn deliveries_of(&self, order_id: i64) -> i64 {
        self.deliveries
            .values()
            .filter(|d| d.order_id == order_id)
            .count() as i64
    }
}

fn duplicate_national_id() -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": "clients_national_id_key" }),
    )
}

fn missing_reference() -> AppError {
    AppError::not_found("Referenced record does not exist", serde_json::Value::Null)
}

/// Memory-backed store selected with `STORAGE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create(&self, profile: ClientProfile) -> Result<Client, AppError> {
        let mut tables = self.tables.write().await;

        if tables.national_id_taken(&profile.national_id, None) {
            return Err(duplicate_national_id());
        }

        tables.last_client_id += 1;
        let now = Utc::now();
        let client = Client::new(tables.last_client_id, profile, now, now);
        tables.clients.insert(client.id, client.clone());

        Ok(client)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        Ok(self.tables.read().await.clients.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .values()
            .find(|c| c.profile.national_id == national_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.tables.read().await.clients.values().cloned().collect())
    }

    async fn update(&self, id: i64, profile: ClientProfile) -> Result<Option<Client>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.clients.contains_key(&id) {
            return Ok(None);
        }
        if tables.national_id_taken(&profile.national_id, Some(id)) {
            return Err(duplicate_national_id());
        }

        let Some(client) = tables.clients.get_mut(&id) else {
            return Ok(None);
        };
        client.profile = profile;
        client.updated_at = Utc::now();

        Ok(Some(client.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        if tables.orders_of(id) > 0 {
            return Err(AppError::integrity(
                "Cannot delete client: there are orders linked to this client",
                None,
            ));
        }

        Ok(tables.clients.remove(&id).is_some())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.clients.contains_key(&new_order.client_id) {
            return Err(missing_reference());
        }

        tables.last_order_id += 1;
        let now = Utc::now();
        let order = Order::new(tables.last_order_id, new_order, now, now);
        tables.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.tables.read().await.orders.values().cloned().collect())
    }

    async fn update(&self, id: i64, fields: NewOrder) -> Result<Option<Order>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.orders.contains_key(&id) {
            return Ok(None);
        }
        if !tables.clients.contains_key(&fields.client_id) {
            return Err(missing_reference());
        }

        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(None);
        };
        order.fields = fields;
        order.updated_at = Utc::now();

        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        if tables.deliveries_of(id) > 0 {
            return Err(AppError::integrity(
                "Cannot delete order: there are deliveries linked to this order",
                None,
            ));
        }

        Ok(tables.orders.remove(&id).is_some())
    }

    async fn count_by_client(&self, client_id: i64) -> Result<i64, AppError> {
        Ok(self.tables.read().await.orders_of(client_id))
    }
}

#[async_trait]
impl DeliveryRepository for MemoryStore {
    async fn create(&self, new_delivery: NewDelivery) -> Result<Delivery, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.orders.contains_key(&new_delivery.order_id) {
            return Err(missing_reference());
        }

        tables.last_delivery_id += 1;
        let now = Utc::now();
        let delivery = Delivery::new(
            tables.last_delivery_id,
            new_delivery.order_id,
            new_delivery.costs,
            new_delivery.status,
            now,
            now,
        );
        tables.deliveries.insert(delivery.id, delivery.clone());

        Ok(delivery)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Delivery>, AppError> {
        Ok(self.tables.read().await.deliveries.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Delivery>, AppError> {
        Ok(self.tables.read().await.deliveries.values().cloned().collect())
    }

    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Delivery>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .deliveries
            .values()
            .filter(|d| d.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        costs: CostBreakdown,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, AppError> {
        let mut tables = self.tables.write().await;

        let Some(delivery) = tables.deliveries.get_mut(&id) else {
            return Ok(None);
        };
        delivery.costs = costs;
        delivery.status = status;
        delivery.updated_at = Utc::now();

        Ok(Some(delivery.clone()))
    }

    async fn update_status(&self, id: i64, status: DeliveryStatus) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        let Some(delivery) = tables.deliveries.get_mut(&id) else {
            return Ok(false);
        };
        delivery.status = status;
        delivery.updated_at = Utc::now();

        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.deliveries.remove(&id).is_some())
    }

    async fn count_by_order(&self, order_id: i64) -> Result<i64, AppError> {
        Ok(self.tables.read().await.deliveries_of(order_id))
    }
}
