//! Repository implementations.
//!
//! Concrete implementations of the domain repository traits: PostgreSQL via
//! SQLx, and an in-process store for running without a database.
//!
//! # Repositories
//!
//! - [`PgClientRepository`] - Client storage in PostgreSQL
//! - [`PgOrderRepository`] - Order storage in PostgreSQL
//! - [`PgDeliveryRepository`] - Delivery storage in PostgreSQL
//! - [`MemoryStore`] - All three tables held in memory
//!
//! [`StoreProbe`] implementations back the health check.

pub mod memory_store;
pub mod pg_client_repository;
pub mod pg_delivery_repository;
pub mod pg_order_repository;
pub mod probe;

pub use memory_store::MemoryStore;
pub use pg_client_repository::PgClientRepository;
pub use pg_delivery_repository::PgDeliveryRepository;
pub use pg_order_repository::PgOrderRepository;
pub use probe::{PgProbe, StoreProbe};
