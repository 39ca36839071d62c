//! HTTP client for the DormMate backend.
//!
//! [`ApiClient`] normalizes every transport-level outcome into a value:
//! 2xx responses decode into typed data, everything else becomes a
//! structured [`ApiError`] resolved through a status-code dictionary with
//! Korean user-facing messages. Calling code renders messages; it never
//! catches raw HTTP failures. [`fridge::FridgeApi`] layers the typed
//! fridge operations on top.

pub mod client;
pub mod errors;
pub mod fridge;

pub use client::{ApiClient, ApiResult, ParseMode};
pub use errors::{ApiError, ErrorDictionary, ErrorTemplate};
