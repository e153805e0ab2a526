#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Shared building blocks for CampusEats frontends.
//!
//! This crate holds everything a client application needs that is not the
//! server itself: the API request/response objects, the locally persisted
//! cart and session state, and (behind the `client` feature) typed HTTP
//! clients plus the polling loops that keep order views fresh.

pub mod cart;
pub mod objects;
pub mod session;
pub mod storage;

#[cfg(feature = "client")]
pub mod client;
