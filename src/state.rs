//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{ClientService, DeliveryService, OrderService, ReferentialGuard};
use crate::domain::repositories::{ClientRepository, DeliveryRepository, OrderRepository};
use crate::infrastructure::persistence::{
    MemoryStore, PgClientRepository, PgDeliveryRepository, PgOrderRepository, PgProbe, StoreProbe,
};

#[derive(Clone)]
pub struct AppState {
    pub client_service: Arc<ClientService>,
    pub order_service: Arc<OrderService>,
    pub delivery_service: Arc<DeliveryService>,
    pub store: Arc<dyn StoreProbe>,
}

impl AppState {
    /// Wires the services over one set of repositories.
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        orders: Arc<dyn OrderRepository>,
        deliveries: Arc<dyn DeliveryRepository>,
        store: Arc<dyn StoreProbe>,
    ) -> Self {
        let guard = Arc::new(ReferentialGuard::new(orders.clone(), deliveries.clone()));

        Self {
            client_service: Arc::new(ClientService::new(clients.clone(), guard.clone())),
            order_service: Arc::new(OrderService::new(orders.clone(), clients, guard)),
            delivery_service: Arc::new(DeliveryService::new(deliveries, orders)),
            store,
        }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self::new(
            Arc::new(PgClientRepository::new(pool.clone())),
            Arc::new(PgOrderRepository::new(pool.clone())),
            Arc::new(PgDeliveryRepository::new(pool.clone())),
            Arc::new(PgProbe::new(pool)),
        )
    }

    /// State backed by a fresh in-process store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }
}
