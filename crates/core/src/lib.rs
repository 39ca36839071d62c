//! Pure domain logic for the DormMate fridge inventory.
//!
//! This crate has zero internal deps so it can be used by the API client,
//! any future CLI tooling, and tests without pulling in HTTP or runtime
//! machinery. Everything here is synchronous and side-effect-free: wire
//! DTOs come in, view models, classifications, and aggregates come out.

pub mod dto;
pub mod error;
pub mod filter;
pub mod freshness;
pub mod mapping;
pub mod model;
pub mod stats;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::CoreError;
