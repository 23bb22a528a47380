//! Core domain logic for the catalog.
//!
//! Three small record families (todos, authors with books, products) share
//! one SQLite store. Writes that depend on other stored records go through
//! a validator or delete guard inside an explicit write scope.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validator;
pub mod wiring;

pub use config::{CatalogConfig, ConfigError};
pub use error::{ServiceError, ServiceResult};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId, Genre};
pub use model::price::Price;
pub use model::product::{Product, ProductId, ProductInput};
pub use model::todo::{Todo, TodoId};
pub use model::ValidationError;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookOrder, BookRepository, SqliteBookRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::{AuthorFilter, AuthorService};
pub use service::book_service::{BookFilter, BookService};
pub use service::notifier::{LogNotifier, Notifier};
pub use service::product_service::ProductService;
pub use service::todo_service::TodoService;
pub use wiring::SqliteCatalog;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
