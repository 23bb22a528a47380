//! Request handlers.
//!
//! # Responsibility
//! - Parse string identifiers and request payloads.
//! - Build request-scoped services through explicit wiring.
//! - Map results and service errors to [`ApiResponse`] values.
//!
//! # Invariants
//! - Handlers never panic and never return a raw error.
//! - Malformed identifiers yield `400` before any storage access.

use crate::response::ApiResponse;
use catalog_core::{LogNotifier, Notifier, RepoResult, ServiceError, ServiceResult, SqliteCatalog};
use log::{debug, warn};
use rusqlite::Connection;
use std::fmt::Display;
use std::str::FromStr;

mod author;
mod book;
mod product;
mod todo;

/// Handler set bound to one migrated connection.
pub struct CatalogApi<'conn, N: Notifier = LogNotifier> {
    catalog: SqliteCatalog<'conn>,
    notifier: N,
}

impl<'conn> CatalogApi<'conn, LogNotifier> {
    /// Handlers that report todo status changes to the log.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_notifier(conn, LogNotifier)
    }
}

impl<'conn, N: Notifier> CatalogApi<'conn, N> {
    pub fn with_notifier(conn: &'conn Connection, notifier: N) -> Self {
        Self {
            catalog: SqliteCatalog::new(conn),
            notifier,
        }
    }
}

/// Parses a path-style identifier or produces the `400` to return.
fn parse_id<T>(entity: &str, raw: &str) -> Result<T, ApiResponse>
where
    T: FromStr,
{
    raw.trim().parse().map_err(|_| {
        debug!("event=api_request module=api status=rejected error_code=malformed_id entity={entity}");
        ApiResponse::bad_request(format!("invalid {entity} id `{}`", raw.trim()))
    })
}

/// Parses a query-style parameter or produces the `400` to return.
fn parse_param<T>(name: &str, raw: &str) -> Result<T, ApiResponse>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|err| ApiResponse::bad_request(format!("invalid {name}: {err}")))
}

/// Turns a service result into a response, mapping errors by kind.
fn respond<T>(
    operation: &'static str,
    result: ServiceResult<T>,
    on_ok: impl FnOnce(T) -> ApiResponse,
) -> ApiResponse {
    match result {
        Ok(value) => on_ok(value),
        Err(err) => {
            let response = ApiResponse::from_error(&err);
            warn!(
                "event=api_request module=api status=error op={operation} http_status={}",
                response.status
            );
            response
        }
    }
}

/// Lifts service construction failures into the service error taxonomy.
fn wired<S>(service: RepoResult<S>) -> ServiceResult<S> {
    service.map_err(ServiceError::from)
}

fn location(collection: &str, id: Option<impl Display>) -> String {
    match id {
        Some(id) => format!("/{collection}/{id}"),
        None => format!("/{collection}"),
    }
}
