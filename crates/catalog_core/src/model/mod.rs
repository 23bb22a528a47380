//! Catalog domain records.
//!
//! # Invariants
//! - A record with `id: None` has never been stored; identity is assigned
//!   on first save (by the store, or by the product service).
//! - `validate()` checks single-record field rules only. Rules that need
//!   other stored records live in `crate::validator`.

pub mod author;
pub mod book;
pub mod price;
pub mod product;
pub mod todo;
mod validation;

pub use validation::ValidationError;
