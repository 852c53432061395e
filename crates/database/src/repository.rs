use crate::{DbError, ProductStore};
use async_trait::async_trait;
use core_types::{Comment, NewComment, NewProduct, Product, ProductUpdate};
use sqlx::postgres::{PgConnection, PgPool};

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Fetches the bare product row. With `lock` set, the row stays locked until
/// the surrounding transaction ends.
async fn fetch_product(
    conn: &mut PgConnection,
    id: i64,
    lock: bool,
) -> Result<Option<Product>, sqlx::Error> {
    let sql = if lock {
        "SELECT id, name, quantity, price, created_at FROM products WHERE id = $1 FOR UPDATE"
    } else {
        "SELECT id, name, quantity, price, created_at FROM products WHERE id = $1"
    };
    sqlx::query_as::<_, Product>(sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn fetch_comments(conn: &mut PgConnection, product_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, author, text, rating, created_at FROM comments WHERE product_id = $1 ORDER BY id ASC",
    )
    .bind(product_id)
    .fetch_all(conn)
    .await
}

#[async_trait]
impl ProductStore for DbRepository {
    async fn insert_product(&self, product: &NewProduct) -> Result<Product, DbError> {
        let saved = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, quantity, price, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, name, quantity, price, created_at
            "#,
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(product_id = saved.id, "Product inserted.");
        Ok(saved)
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let Some(mut product) = fetch_product(&mut conn, id, false).await? else {
            return Ok(None);
        };
        product.comments = fetch_comments(&mut conn, id).await?;
        Ok(Some(product))
    }

    async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, DbError> {
        // Dropping `tx` on any early return rolls the transaction back.
        let mut tx = self.pool.begin().await?;

        let Some(mut product) = fetch_product(&mut tx, id, true).await? else {
            return Ok(None);
        };

        if update.apply_to(&mut product) {
            sqlx::query("UPDATE products SET name = $1, quantity = $2, price = $3 WHERE id = $4")
                .bind(&product.name)
                .bind(product.quantity)
                .bind(product.price)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        } else {
            tracing::debug!(product_id = id, "Update left the product unchanged.");
        }

        product.comments = fetch_comments(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(product))
    }

    async fn delete_product(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn add_comment(
        &self,
        id: i64,
        comment: &NewComment,
    ) -> Result<Option<Product>, DbError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut product) = fetch_product(&mut tx, id, true).await? else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO comments (product_id, author, text, rating, created_at) VALUES ($1, $2, $3, $4, NOW())",
        )
        .bind(id)
        .bind(comment.author.as_deref())
        .bind(comment.text.as_deref())
        .bind(comment.rating)
        .execute(&mut *tx)
        .await?;

        product.comments = fetch_comments(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(product))
    }
}
