//! # Mercado Database Crate
//!
//! This crate is the persistence adapter of the product catalog. It hides the
//! SQL behind the `ProductStore` trait so the web layer only deals with
//! products and comments.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All PostgreSQL-specific logic lives here. The rest of the
//!   application talks to `ProductStore`.
//! - **Delegated Guarantees:** Name uniqueness and the product/comment foreign
//!   key are enforced by the schema. A duplicate name surfaces as
//!   `DbError::UniqueViolation`.
//! - **Scoped Transactions:** Every multi-statement operation runs in a
//!   `sqlx::Transaction` that commits on success and rolls back when dropped
//!   on any error path.
//!
//! ## Public API
//!
//! - `connect`: Builds the connection pool from `DatabaseSettings`.
//! - `run_migrations`: Creates the `products` and `comments` tables if missing.
//! - `ProductStore`: The operations the request handlers need.
//! - `DbRepository`: The PostgreSQL implementation of `ProductStore`.
//! - `MemoryStore` (feature `memory`): An in-process implementation for tests.
//! - `DbError`: The specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod repository;
pub mod store;

pub use connection::{connect, run_migrations};
pub use error::DbError;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use repository::DbRepository;
pub use store::ProductStore;
