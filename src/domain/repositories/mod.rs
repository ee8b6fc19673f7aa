//! Repository trait definitions for the domain layer.
//!
//! Each entity gets one trait exposing get / list / insert / update / delete and,
//! where something depends on it, a count by foreign key. Services only talk to
//! these traits; concrete stores live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`ClientRepository`] - Client records
//! - [`OrderRepository`] - Order records, counted by client
//! - [`DeliveryRepository`] - Delivery records, counted by order
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.
//! See `tests/repository_*.rs` for the PostgreSQL implementations.

pub mod client_repository;
pub mod delivery_repository;
pub mod order_repository;

pub use client_repository::ClientRepository;
pub use delivery_repository::DeliveryRepository;
pub use order_repository::OrderRepository;

#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use delivery_repository::MockDeliveryRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
