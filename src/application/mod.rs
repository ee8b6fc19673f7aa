//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::client_service::ClientService`] - Client CRUD with nationalId uniqueness
//! - [`services::order_service::OrderService`] - Order CRUD bound to existing clients
//! - [`services::delivery_service::DeliveryService`] - Pricing and status lifecycle
//! - [`services::referential_guard::ReferentialGuard`] - Dependency checks before deletes

pub mod services;
