//! Request/response mapping for catalog use cases.
//!
//! Handlers take string identifiers and typed payloads, call the core
//! services and answer with a status-coded [`ApiResponse`]. Routing and
//! transport are left to the caller.

mod api;
pub mod dto;
pub mod response;

pub use api::CatalogApi;
pub use response::{ApiResponse, ErrorBody, FieldError};
