//! Book use-case service.
//!
//! # Invariants
//! - A book may only reference an author that exists at write time.
//! - `search` dispatches to exactly one repository predicate.

use crate::db::WriteScope;
use crate::error::{ServiceError, ServiceResult};
use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId, Genre};
use crate::model::price::Price;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::{BookOrder, BookRepository};
use chrono::NaiveDate;
use log::info;

/// Optional book search criteria.
///
/// Supported combinations: title + price, title + isbn, title, isbn,
/// publication range, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<Price>,
    /// Inclusive `(start, end)` publication range.
    pub published_between: Option<(NaiveDate, NaiveDate)>,
}

pub struct BookService<B: BookRepository, A: AuthorRepository, S: WriteScope> {
    books: B,
    authors: A,
    scope: S,
}

impl<B: BookRepository, A: AuthorRepository, S: WriteScope> BookService<B, A, S> {
    pub fn new(books: B, authors: A, scope: S) -> Self {
        Self {
            books,
            authors,
            scope,
        }
    }

    pub fn create(&self, book: &Book) -> ServiceResult<Book> {
        if book.id.is_some() {
            return Err(ServiceError::InvalidArgument(
                "a new book must not carry an id".to_string(),
            ));
        }
        let created = self.scope.run("book_create", || self.check_and_save(book))?;
        info!(
            "event=book_create module=book status=ok id={}",
            created.id.map(|id| id.to_string()).unwrap_or_default()
        );
        Ok(created)
    }

    pub fn update(&self, book: &Book) -> ServiceResult<Book> {
        if book.id.is_none() {
            return Err(ServiceError::InvalidArgument(
                "a book must already be stored before it can be updated".to_string(),
            ));
        }
        self.scope.run("book_update", || self.check_and_save(book))
    }

    pub fn find_by_id(&self, id: BookId) -> ServiceResult<Option<Book>> {
        Ok(self.books.find_by_id(id)?)
    }

    pub fn delete_by_id(&self, id: BookId) -> ServiceResult<()> {
        self.books.delete_by_id(id)?;
        info!("event=book_delete module=book status=ok id={id}");
        Ok(())
    }

    pub fn search(&self, filter: &BookFilter) -> ServiceResult<Vec<Book>> {
        let title = non_blank(&filter.title);
        let isbn = non_blank(&filter.isbn);

        let books = match (title, isbn, filter.price, filter.published_between) {
            (Some(title), None, Some(price), None) => {
                self.books.find_by_title_and_price(title, price)?
            }
            (Some(title), Some(isbn), None, None) => self.books.find_by_title_or_isbn(title, isbn)?,
            (Some(title), None, None, None) => self.books.find_by_title(title)?,
            (None, Some(isbn), None, None) => self.books.find_by_isbn(isbn)?,
            (None, None, None, Some((start, end))) => {
                if start > end {
                    return Err(ServiceError::InvalidArgument(format!(
                        "publication range start {start} is after end {end}"
                    )));
                }
                self.books.find_by_publication_date_between(start, end)?
            }
            (None, None, None, None) => self.books.list_ordered_by_title_and_price()?,
            _ => {
                return Err(ServiceError::InvalidArgument(
                    "unsupported book filter combination".to_string(),
                ))
            }
        };
        Ok(books)
    }

    pub fn books_by_author(&self, author_id: AuthorId) -> ServiceResult<Vec<Book>> {
        Ok(self.books.find_by_author(author_id)?)
    }

    pub fn books_by_genre(&self, genre: Genre, order: BookOrder) -> ServiceResult<Vec<Book>> {
        Ok(self.books.find_by_genre(genre, order)?)
    }

    pub fn distinct_titles(&self) -> ServiceResult<Vec<String>> {
        Ok(self.books.list_distinct_titles()?)
    }

    pub fn authors_with_books(&self) -> ServiceResult<Vec<Author>> {
        Ok(self.books.list_authors_of_books()?)
    }

    pub fn genres_by_author_nationality(&self, nationality: &str) -> ServiceResult<Vec<Genre>> {
        Ok(self.books.list_genres_by_author_nationality(nationality)?)
    }

    /// Removes every book of `genre`; returns how many were removed.
    pub fn delete_by_genre(&self, genre: Genre) -> ServiceResult<usize> {
        let removed = self.scope.run("book_delete_by_genre", || {
            Ok::<_, ServiceError>(self.books.delete_by_genre(genre)?)
        })?;
        info!("event=book_delete_by_genre module=book status=ok genre={genre} rows={removed}");
        Ok(removed)
    }

    /// Sets the publication date of every book; returns the row count.
    pub fn update_publication_date(&self, date: NaiveDate) -> ServiceResult<usize> {
        let changed = self.scope.run("book_update_publication_date", || {
            Ok::<_, ServiceError>(self.books.update_publication_date(date)?)
        })?;
        info!("event=book_update_publication_date module=book status=ok rows={changed}");
        Ok(changed)
    }

    fn check_and_save(&self, book: &Book) -> ServiceResult<Book> {
        book.validate()?;
        if let Some(author_id) = book.author_id {
            if self.authors.find_by_id(author_id)?.is_none() {
                return Err(ServiceError::InvalidArgument(format!(
                    "author {author_id} does not exist"
                )));
            }
        }
        Ok(self.books.save(book)?)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
