//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define the contracts implemented by
//! [`crate::infrastructure::persistence`].
//!
//! # Modules
//!
//! - [`entities`] - Clients, orders, deliveries and their patch types
//! - [`money`] - Two-decimal rounding used by every pricing step
//! - [`pricing`] - Delivery cost computation
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod money;
pub mod pricing;
pub mod repositories;
