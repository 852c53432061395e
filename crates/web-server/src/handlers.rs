use crate::error::{
    AppError, COMMENT_FAILED, DELETE_FAILED, DUPLICATE_ON_SAVE, DUPLICATE_ON_UPDATE,
    INVALID_QUANTITY_OR_VALUE, INVALID_RATING, LOAD_FAILED, SAVE_FAILED, UPDATE_FAILED,
};
use crate::forms::{CommentForm, ProductForm};
use crate::{AppState, views};
use axum::{
    extract::{Path, State},
    response::Html,
};
use core_types::{NewComment, NewProduct, Product, ProductUpdate};
use std::sync::Arc;

/// The example items listed on the landing page.
pub const HOME_ITEMS: [&str; 3] = ["banana", "maçã", "uva"];

/// Path identifiers arrive as text. One that is not an integer cannot match
/// any row, so it is reported the same way as a missing product.
fn parse_product_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| AppError::NotFound)
}

/// Loads a product or fails with `NotFound`; store errors are reported with `on_error`.
async fn load_product(
    state: &AppState,
    id: i64,
    on_error: &'static str,
) -> Result<Product, AppError> {
    state
        .store
        .find_product(id)
        .await
        .map_err(|e| AppError::failed(on_error, e))?
        .ok_or(AppError::NotFound)
}

/// # GET /
pub async fn home() -> Result<Html<String>, AppError> {
    Ok(Html(views::home_page(&HOME_ITEMS)?))
}

/// # POST /add_produto
pub async fn add_product(
    State(state): State<Arc<AppState>>,
    form: ProductForm,
) -> Result<Html<String>, AppError> {
    let new_product = NewProduct::from_fields(
        form.name.as_deref(),
        form.quantity.as_deref(),
        form.price.as_deref(),
    )
    .map_err(|e| AppError::failed(SAVE_FAILED, e))?;

    let product = state
        .store
        .insert_product(&new_product)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict(DUPLICATE_ON_SAVE)
            } else {
                AppError::failed(SAVE_FAILED, e)
            }
        })?;

    tracing::info!(product_id = product.id, name = %product.name, "Product saved.");
    Ok(Html(views::product_page(&product)?))
}

/// # GET /get_produto/:product_id
pub async fn get_product(
    Path(product_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&product_id)?;
    let product = load_product(&state, id, LOAD_FAILED).await?;
    Ok(Html(views::product_page(&product)?))
}

/// # POST|PUT /update_produto/:product_id
/// The product must exist before the submitted numbers are even looked at.
pub async fn update_product(
    Path(product_id): Path<String>,
    State(state): State<Arc<AppState>>,
    form: ProductForm,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&product_id)?;
    load_product(&state, id, UPDATE_FAILED).await?;

    let update = ProductUpdate::from_fields(
        form.name.as_deref(),
        form.quantity.as_deref(),
        form.price.as_deref(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, product_id = id, "Rejected product update.");
        AppError::InvalidInput(INVALID_QUANTITY_OR_VALUE)
    })?;

    let product = state
        .store
        .update_product(id, &update)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict(DUPLICATE_ON_UPDATE)
            } else {
                AppError::failed(UPDATE_FAILED, e)
            }
        })?
        .ok_or(AppError::NotFound)?;

    tracing::info!(product_id = id, changed = update.changes().is_some(), "Product updated.");
    Ok(Html(views::product_page(&product)?))
}

/// # DELETE /del_produto/:product_id
pub async fn delete_product(
    Path(product_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&product_id)?;
    let deleted = state
        .store
        .delete_product(id)
        .await
        .map_err(|e| AppError::failed(DELETE_FAILED, e))?;

    if deleted != 1 {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = id, "Product deleted.");
    Ok(Html(views::deleted_page(&product_id)?))
}

/// # POST /add_comentario/:product_id
pub async fn add_comment(
    Path(product_id): Path<String>,
    State(state): State<Arc<AppState>>,
    form: CommentForm,
) -> Result<Html<String>, AppError> {
    let id = parse_product_id(&product_id)?;
    load_product(&state, id, COMMENT_FAILED).await?;

    let comment = NewComment::from_fields(
        form.author.as_deref(),
        form.text.as_deref(),
        form.rating.as_deref(),
    )
    .map_err(|_| AppError::InvalidInput(INVALID_RATING))?;

    let product = state
        .store
        .add_comment(id, &comment)
        .await
        .map_err(|e| AppError::failed(COMMENT_FAILED, e))?
        .ok_or(AppError::NotFound)?;

    tracing::info!(product_id = id, comments = product.comments.len(), "Comment added.");
    Ok(Html(views::product_page(&product)?))
}
