//! Catalog-item record (`product` collection).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clinic_core::{check_at_least, FieldReader, NonEmptyText, Rule, ValidationError, ValidationOptions};

use crate::record::{Record, RecordKind};

/// Non-negative, finite price in dollars.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate and construct a price.
    pub fn new(amount: f64) -> Result<Self, Rule> {
        check_at_least(amount, 0.0).map(Self)
    }

    /// Amount in dollars.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl TryFrom<f64> for Price {
    type Error = Rule;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

/// An item the clinic sells.
///
/// ## Invariants
/// - `title` and `category` have at least one non-whitespace character.
/// - `price` is finite and at least 0.
/// - `in_stock` defaults to `true` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Product {
    title: NonEmptyText,
    description: Option<String>,
    price: Price,
    category: NonEmptyText,
    in_stock: bool,
}

impl Product {
    /// Product title.
    pub fn title(&self) -> &NonEmptyText {
        &self.title
    }

    /// Product description, if provided.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Price in dollars.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Product category.
    pub fn category(&self) -> &NonEmptyText {
        &self.category
    }

    /// Whether the product is in stock.
    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

impl Record for Product {
    const KIND: RecordKind = RecordKind::Product;

    fn from_raw(raw: &Value, options: &ValidationOptions) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::KIND.type_name(), raw, options);
        let title = reader.required_text("title", NonEmptyText::new);
        let description = reader.optional_text("description", Ok);
        let price = reader.required_float("price", Price::new);
        let category = reader.required_text("category", NonEmptyText::new);
        let in_stock = reader.boolean_or("in_stock", true);

        reader.finish(move || {
            Some(Self {
                title: title?,
                description: description?,
                price: price?,
                category: category?,
                in_stock: in_stock?,
            })
        })
    }
}

impl TryFrom<Value> for Product {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::from_raw(&raw, &ValidationOptions::default())
    }
}
