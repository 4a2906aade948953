//! Roughtime client protocol engine: request construction (C6) and response validation
//! (C4, C7) on top of the tag-value message codec in [`protocol`].
//!
//! This crate is unsafe-free. Network transport, retries, and multi-server measurement
//! are external collaborators and out of scope here: see [`Client`] for the one-shot
//! request/response lifecycle this crate does own.

#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod request;
pub mod validation;
pub mod verify;

pub use client::Client;
pub use error::{ClientError, ValidationError};
pub use validation::ValidatedResponse;
