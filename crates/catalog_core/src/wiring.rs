//! Explicit constructor wiring of SQLite-backed services.
//!
//! Every accessor builds a fresh, request-scoped service graph over the
//! same connection. Nothing is cached between calls.

use crate::db::SqliteWriteScope;
use crate::repo::author_repo::SqliteAuthorRepository;
use crate::repo::book_repo::SqliteBookRepository;
use crate::repo::product_repo::SqliteProductRepository;
use crate::repo::todo_repo::SqliteTodoRepository;
use crate::repo::RepoResult;
use crate::service::author_service::AuthorService;
use crate::service::book_service::BookService;
use crate::service::notifier::Notifier;
use crate::service::product_service::ProductService;
use crate::service::todo_service::TodoService;
use crate::validator::{AuthorDeleteGuard, AuthorValidator, TodoValidator};
use rusqlite::Connection;

pub type SqliteTodoService<'conn, N> =
    TodoService<SqliteTodoRepository<'conn>, N, SqliteWriteScope<'conn>>;
pub type SqliteAuthorService<'conn> =
    AuthorService<SqliteAuthorRepository<'conn>, SqliteBookRepository<'conn>, SqliteWriteScope<'conn>>;
pub type SqliteBookService<'conn> =
    BookService<SqliteBookRepository<'conn>, SqliteAuthorRepository<'conn>, SqliteWriteScope<'conn>>;
pub type SqliteProductService<'conn> = ProductService<SqliteProductRepository<'conn>>;

/// Service factory over one migrated connection.
#[derive(Clone, Copy)]
pub struct SqliteCatalog<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalog<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn todos<N: Notifier>(&self, notifier: N) -> RepoResult<SqliteTodoService<'conn, N>> {
        let repo = SqliteTodoRepository::try_new(self.conn)?;
        Ok(TodoService::new(
            repo,
            TodoValidator::new(repo),
            notifier,
            SqliteWriteScope::new(self.conn),
        ))
    }

    pub fn authors(&self) -> RepoResult<SqliteAuthorService<'conn>> {
        let authors = SqliteAuthorRepository::try_new(self.conn)?;
        let books = SqliteBookRepository::try_new(self.conn)?;
        Ok(AuthorService::new(
            authors,
            books,
            AuthorValidator::new(authors),
            AuthorDeleteGuard::new(books),
            SqliteWriteScope::new(self.conn),
        ))
    }

    pub fn books(&self) -> RepoResult<SqliteBookService<'conn>> {
        Ok(BookService::new(
            SqliteBookRepository::try_new(self.conn)?,
            SqliteAuthorRepository::try_new(self.conn)?,
            SqliteWriteScope::new(self.conn),
        ))
    }

    pub fn products(&self) -> RepoResult<SqliteProductService<'conn>> {
        Ok(ProductService::new(SqliteProductRepository::try_new(
            self.conn,
        )?))
    }
}
