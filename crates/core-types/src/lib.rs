//! # Mercado Core Types
//!
//! The data model shared by every other crate: the persisted `Product` and
//! `Comment` entities, the inputs used to create and change them, and the
//! coercion rules that turn raw form text into typed values.

pub mod coercion;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Presence;
pub use error::CoreError;
pub use structs::{Comment, NewComment, NewProduct, Product, ProductUpdate};
