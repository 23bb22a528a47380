//! Product record.
//!
//! Products carry a text identity chosen by the service (a UUID string) and
//! have no cross-record invariants: replace and delete are unconditional.

use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type ProductId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Caller-supplied product fields, without identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, None)?;
        match self.price {
            Some(price) if !price.is_finite() || price < 0.0 => Err(ValidationError::Malformed {
                field: "price",
                reason: "must be a non-negative number".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
