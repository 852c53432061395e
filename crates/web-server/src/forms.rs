//! Form bodies as submitted by the catalog pages.
//!
//! Every field is kept as raw text: coercion happens in `core_types` so a
//! malformed number yields the catalog's own error view instead of a
//! framework rejection. The wire names are the Portuguese ones used by the
//! pages; the English names are accepted too. When a field is sent more than
//! once, under either name, the first occurrence wins.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};

/// The raw `key=value` pairs of a urlencoded body, in submission order.
#[derive(Debug, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// The first value sent under any of `names`.
    pub fn first(&self, names: &[&str]) -> Option<String> {
        self.0
            .iter()
            .find(|(key, _)| names.contains(&key.as_str()))
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
        Ok(Self(pairs))
    }
}

#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl From<FormFields> for ProductForm {
    fn from(fields: FormFields) -> Self {
        Self {
            name: fields.first(&["nome", "name"]),
            quantity: fields.first(&["quantidade", "quantity"]),
            price: fields.first(&["valor", "price"]),
        }
    }
}

#[derive(Debug, Default)]
pub struct CommentForm {
    pub author: Option<String>,
    pub text: Option<String>,
    pub rating: Option<String>,
}

impl From<FormFields> for CommentForm {
    fn from(fields: FormFields) -> Self {
        Self {
            author: fields.first(&["autor", "author"]),
            text: fields.first(&["texto", "text"]),
            rating: fields.first(&["n_estrelas", "n_estrela", "rating"]),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        FormFields::from_request(req, state).await.map(Self::from)
    }
}

#[async_trait]
impl<S> FromRequest<S> for CommentForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        FormFields::from_request(req, state).await.map(Self::from)
    }
}
