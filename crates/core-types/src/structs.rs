use crate::coercion::{parse_price, parse_quantity, parse_rating};
use crate::enums::Presence;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A catalog item. Represents a row from the `products` table plus its comments.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    /// Unique across all products; the database enforces it.
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    /// In submission order. Loaded separately from the `comments` table.
    #[sqlx(skip)]
    pub comments: Vec<Comment>,
}

/// A rated, free-text note attached to exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub author: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// The values needed to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl NewProduct {
    /// Builds a product from raw form text. All three fields are required.
    pub fn from_fields(
        name: Option<&str>,
        quantity: Option<&str>,
        price: Option<&str>,
    ) -> Result<Self, CoreError> {
        let name = name.ok_or(CoreError::MissingField("name"))?;
        let quantity = parse_quantity(quantity.ok_or(CoreError::MissingField("quantity"))?)?;
        let price = parse_price(price.ok_or(CoreError::MissingField("price"))?)?;
        Ok(Self {
            name: name.to_string(),
            quantity,
            price,
        })
    }
}

/// The values needed to append a comment to a product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewComment {
    pub author: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
}

impl NewComment {
    pub fn from_fields(
        author: Option<&str>,
        text: Option<&str>,
        rating: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            author: author.map(str::to_string),
            text: text.map(str::to_string),
            rating: parse_rating(rating)?,
        })
    }
}

/// A requested change to a product's name, quantity and price.
///
/// The three columns are only ever overwritten together: unless every field
/// is `Present`, the update leaves the row as it is. An empty name or a zero
/// quantity or price therefore turns the whole request into a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: Presence<String>,
    pub quantity: Presence<i32>,
    pub price: Presence<Decimal>,
}

impl ProductUpdate {
    /// Classifies raw form text. A quantity or price that was sent but does
    /// not coerce is an error; one that was not sent is `Absent`.
    pub fn from_fields(
        name: Option<&str>,
        quantity: Option<&str>,
        price: Option<&str>,
    ) -> Result<Self, CoreError> {
        let quantity = quantity.map(parse_quantity).transpose()?;
        let price = price.map(parse_price).transpose()?;
        Ok(Self {
            name: Presence::classify(name.map(str::to_string), |n| n.is_empty()),
            quantity: Presence::classify(quantity, |q| *q == 0),
            price: Presence::classify(price, |p| p.is_zero()),
        })
    }

    /// Returns the new column values when all three fields are present.
    pub fn changes(&self) -> Option<(&str, i32, Decimal)> {
        match (self.name.as_ref(), self.quantity, self.price) {
            (Presence::Present(name), Presence::Present(quantity), Presence::Present(price)) => {
                Some((name.as_str(), quantity, price))
            }
            _ => None,
        }
    }

    /// Applies the update in place. Returns whether anything was written.
    pub fn apply_to(&self, product: &mut Product) -> bool {
        match self.changes() {
            Some((name, quantity, price)) => {
                product.name = name.to_string();
                product.quantity = quantity;
                product.price = price;
                true
            }
            None => false,
        }
    }
}
