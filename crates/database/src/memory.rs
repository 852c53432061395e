//! An in-process `ProductStore` that mirrors the PostgreSQL schema rules:
//! generated ids, unique product names and comments that cascade on delete.

use crate::{DbError, ProductStore};
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Comment, NewComment, NewProduct, Product, ProductUpdate};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    next_product_id: i64,
    next_comment_id: i64,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.products
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.tables.lock().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn duplicate(name: &str) -> DbError {
    DbError::UniqueViolation(format!("duplicate key value violates unique constraint \"products_name_key\" ({name})"))
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: &NewProduct) -> Result<Product, DbError> {
        let mut tables = self.tables.lock().await;
        if tables.name_taken(&product.name, None) {
            return Err(duplicate(&product.name));
        }
        tables.next_product_id += 1;
        let saved = Product {
            id: tables.next_product_id,
            name: product.name.clone(),
            quantity: product.quantity,
            price: product.price,
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        tables.products.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        Ok(self.tables.lock().await.products.get(&id).cloned())
    }

    async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DbError> {
        let mut tables = self.tables.lock().await;
        let Some(current) = tables.products.get(&id) else {
            return Ok(None);
        };

        // Work on a copy so a rejected update leaves the stored row untouched.
        let mut product = current.clone();
        if update.apply_to(&mut product) {
            if tables.name_taken(&product.name, Some(id)) {
                return Err(duplicate(&product.name));
            }
            tables.products.insert(id, product.clone());
        }
        Ok(Some(product))
    }

    async fn delete_product(&self, id: i64) -> Result<u64, DbError> {
        let removed = self.tables.lock().await.products.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn add_comment(
        &self,
        id: i64,
        comment: &NewComment,
    ) -> Result<Option<Product>, DbError> {
        let mut tables = self.tables.lock().await;
        tables.next_comment_id += 1;
        let comment_id = tables.next_comment_id;

        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        product.comments.push(Comment {
            id: comment_id,
            author: comment.author.clone(),
            text: comment.text.clone(),
            rating: comment.rating,
            created_at: Utc::now(),
        });
        Ok(Some(product.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            quantity: 10,
            price: "2.5".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = MemoryStore::new();
        let first = store.insert_product(&new_product("Banana")).await.unwrap();

        let err = store.insert_product(&new_product("Banana")).await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_product(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn renaming_onto_another_product_is_rejected() {
        let store = MemoryStore::new();
        store.insert_product(&new_product("Banana")).await.unwrap();
        let uva = store.insert_product(&new_product("Uva")).await.unwrap();

        let update = ProductUpdate::from_fields(Some("Banana"), Some("1"), Some("1")).unwrap();
        let err = store.update_product(uva.id, &update).await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(store.find_product(uva.id).await.unwrap().unwrap().name, "Uva");
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let store = MemoryStore::new();
        let banana = store.insert_product(&new_product("Banana")).await.unwrap();
        assert_eq!(store.delete_product(banana.id).await.unwrap(), 1);
        assert_eq!(store.delete_product(banana.id).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn comments_keep_submission_order() {
        let store = MemoryStore::new();
        let banana = store.insert_product(&new_product("Banana")).await.unwrap();
        for author in ["Ana", "Bia", "Caio"] {
            let comment = NewComment {
                author: Some(author.to_string()),
                ..NewComment::default()
            };
            store.add_comment(banana.id, &comment).await.unwrap();
        }

        let product = store.find_product(banana.id).await.unwrap().unwrap();
        let authors: Vec<_> = product.comments.iter().filter_map(|c| c.author.as_deref()).collect();
        assert_eq!(authors, ["Ana", "Bia", "Caio"]);
    }

    #[tokio::test]
    async fn commenting_on_a_missing_product_returns_none() {
        let store = MemoryStore::new();
        let result = store.add_comment(42, &NewComment::default()).await.unwrap();
        assert!(result.is_none());
    }
}
