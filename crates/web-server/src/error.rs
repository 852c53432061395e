use crate::views::{self, ViewError};
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::error::Error as StdError;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "product not found";
pub const DUPLICATE_ON_SAVE: &str = "product with same name already saved";
pub const SAVE_FAILED: &str = "could not save new item";
pub const INVALID_QUANTITY_OR_VALUE: &str = "invalid quantity or value";
pub const DUPLICATE_ON_UPDATE: &str = "product with same name already exists";
pub const UPDATE_FAILED: &str = "could not update product";
pub const INVALID_RATING: &str = "invalid star rating";
pub const COMMENT_FAILED: &str = "could not save comment";
pub const LOAD_FAILED: &str = "could not load product";
pub const DELETE_FAILED: &str = "could not delete product";
pub const UNREADABLE_FORM: &str = "could not read the submitted form";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", PRODUCT_NOT_FOUND)]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Any other failure. The cause is logged; only `message` reaches the client.
    #[error("{message}: {source}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The body was not a urlencoded form. The rejection keeps its own status.
    #[error("Unreadable form: {0}")]
    Form(#[from] FormRejection),

    #[error("View error: {0}")]
    View(#[from] ViewError),
}

impl AppError {
    pub fn failed(message: &'static str, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        AppError::Failed {
            message,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) | AppError::Failed { .. } => StatusCode::BAD_REQUEST,
            AppError::Form(rejection) => rejection.status(),
            AppError::View(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts our custom `AppError` into the HTML error view.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::NotFound => PRODUCT_NOT_FOUND,
            AppError::Conflict(message) | AppError::InvalidInput(message) => *message,
            AppError::Failed { message, source } => {
                tracing::error!(error = %source, "{}", message);
                *message
            }
            AppError::Form(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected form body.");
                UNREADABLE_FORM
            }
            AppError::View(view_err) => {
                tracing::error!(error = ?view_err, "View error.");
                return (status, "Internal Server Error").into_response();
            }
        };

        match views::error_page(status.as_u16(), error_message) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(view_err) => {
                tracing::error!(error = ?view_err, "Failed to render the error view.");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_maps_to_its_status() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict(DUPLICATE_ON_SAVE).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidInput(INVALID_QUANTITY_OR_VALUE).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::failed(SAVE_FAILED, "connection reset").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unspecified_failure_is_a_bad_request() {
        let response = AppError::failed(UPDATE_FAILED, "relation \"products\" does not exist").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
