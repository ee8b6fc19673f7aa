//! Core domain entities of the fulfilment workflow.
//!
//! Entities are plain data structures. Stored records (`Client`, `Order`,
//! `Delivery`) pair an id and timestamps with the data that callers write;
//! the `*Patch` types carry partial updates and know how to merge themselves
//! over stored values.
//!
//! # Entity Types
//!
//! - [`Client`] - Places orders
//! - [`Order`] - Shipment request with weight, distance and rates
//! - [`Delivery`] - Priced and status-tracked execution of an order

pub mod client;
pub mod delivery;
pub mod order;

pub use client::{Client, ClientPatch, ClientProfile};
pub use delivery::{
    CostBreakdown, Delivery, DeliveryPatch, DeliveryStatus, NewDelivery, UnknownStatus,
};
pub use order::{DeliveryType, NewOrder, Order, OrderPatch};
