use crate::DbError;
use async_trait::async_trait;
use core_types::{NewComment, NewProduct, Product, ProductUpdate};

/// The data-access operations behind the catalog endpoints.
///
/// Lookups are by primary key only. Methods that can miss return `Ok(None)`
/// rather than an error, so a missing product is never confused with a
/// failing database.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a product. A duplicate name fails with `DbError::UniqueViolation`.
    async fn insert_product(&self, product: &NewProduct) -> Result<Product, DbError>;

    /// Fetches a product together with its comments in submission order.
    async fn find_product(&self, id: i64) -> Result<Option<Product>, DbError>;

    /// Applies `update` to the product and returns its new state.
    async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DbError>;

    /// Deletes the product and returns how many rows were removed.
    async fn delete_product(&self, id: i64) -> Result<u64, DbError>;

    /// Appends a comment and returns the product with the updated comment list.
    async fn add_comment(&self, id: i64, comment: &NewComment)
        -> Result<Option<Product>, DbError>;
}
