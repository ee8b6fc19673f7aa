//! Business logic services for the application layer.

pub mod client_service;
pub mod delivery_service;
pub mod order_service;
pub mod referential_guard;

pub use client_service::ClientService;
pub use delivery_service::DeliveryService;
pub use order_service::OrderService;
pub use referential_guard::{EntityKind, ReferentialGuard};
