//! Wire format and data structures for the Roughtime tag-value message container (C1, C2, C5).
//!
//! This crate uses only safe Rust.
#![forbid(unsafe_code)]

pub mod constants;
pub mod cursor;
pub mod error;
pub mod message;
pub mod tag;

pub use error::Error;
pub use message::{Message, MIN_REQUEST_LENGTH};
pub use tag::Tag;
