//! The order lifecycle engine.
//!
//! [`create`] turns a checkout request into a priced, persisted order with
//! frozen line snapshots; [`status`] is the vendor-driven state machine
//! that moves the order through fulfillment afterwards. Everything else in
//! the system only reads what these two modules write.

pub mod create;
pub mod status;

pub use create::{CreateOrderError, create_order};
pub use status::{StatusError, set_status, transition_allowed};
