//! Data Transfer Objects for API requests and responses.
//!
//! JSON field names are camelCase. Monetary values are serialized as JSON
//! numbers; request bodies accept numbers or numeric strings.

pub mod client;
pub mod delivery;
pub mod envelope;
pub mod fields;
pub mod health;
pub mod order;
