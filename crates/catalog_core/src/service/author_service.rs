//! Author use-case service.
//!
//! # Responsibility
//! - Sequence uniqueness validation and persistence for author writes.
//! - Guard deletes against authors that still have books.
//! - Dispatch author searches to the narrowest matching predicate.
//!
//! # Invariants
//! - Every check-then-write sequence runs inside one write scope.
//! - `update` and `delete` require a stored identity.

use crate::db::WriteScope;
use crate::error::{ServiceError, ServiceResult};
use crate::model::author::{Author, AuthorId};
use crate::model::book::Book;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use crate::validator::{AuthorDeleteGuard, AuthorValidator, DeleteGuard, PreWriteValidator};
use log::info;

/// Optional author search criteria. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub name: Option<String>,
    pub nationality: Option<String>,
}

impl AuthorFilter {
    fn normalized(&self) -> (Option<&str>, Option<&str>) {
        fn clean(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
        }
        (clean(&self.name), clean(&self.nationality))
    }
}

pub struct AuthorService<A, B, S>
where
    A: AuthorRepository,
    B: BookRepository,
    S: WriteScope,
{
    authors: A,
    books: B,
    validator: AuthorValidator<A>,
    guard: AuthorDeleteGuard<B>,
    scope: S,
}

impl<A, B, S> AuthorService<A, B, S>
where
    A: AuthorRepository,
    B: BookRepository,
    S: WriteScope,
{
    pub fn new(
        authors: A,
        books: B,
        validator: AuthorValidator<A>,
        guard: AuthorDeleteGuard<B>,
        scope: S,
    ) -> Self {
        Self {
            authors,
            books,
            validator,
            guard,
            scope,
        }
    }

    /// Registers a new author and returns it with id and audit fields.
    pub fn create(&self, author: &Author) -> ServiceResult<Author> {
        ensure_unsaved(author)?;
        let created = self.scope.run("author_create", || self.validate_and_save(author))?;
        info!(
            "event=author_create module=author status=ok id={}",
            created.id.map(|id| id.to_string()).unwrap_or_default()
        );
        Ok(created)
    }

    /// Re-saves a stored author.
    pub fn update(&self, author: &Author) -> ServiceResult<Author> {
        let id = author.id.ok_or_else(|| {
            ServiceError::InvalidArgument(
                "an author must already be stored before it can be updated".to_string(),
            )
        })?;
        let updated = self.scope.run("author_update", || self.validate_and_save(author))?;
        info!("event=author_update module=author status=ok id={id}");
        Ok(updated)
    }

    pub fn find_by_id(&self, id: AuthorId) -> ServiceResult<Option<Author>> {
        Ok(self.authors.find_by_id(id)?)
    }

    /// Both criteria: AND match. One criterion: single match. None: all.
    pub fn search(&self, filter: &AuthorFilter) -> ServiceResult<Vec<Author>> {
        let authors = match filter.normalized() {
            (Some(name), Some(nationality)) => {
                self.authors.find_by_name_and_nationality(name, nationality)?
            }
            (Some(name), None) => self.authors.find_by_name(name)?,
            (None, Some(nationality)) => self.authors.find_by_nationality(nationality)?,
            (None, None) => self.authors.find_all()?,
        };
        Ok(authors)
    }

    /// Deletes a stored author that has no books.
    pub fn delete(&self, author: &Author) -> ServiceResult<()> {
        let id = author.id.ok_or_else(|| {
            ServiceError::InvalidArgument("cannot delete an author that was never stored".to_string())
        })?;
        self.scope.run("author_delete", || {
            self.guard.ensure_deletable(&id)?;
            Ok::<_, ServiceError>(self.authors.delete(id)?)
        })?;
        info!("event=author_delete module=author status=ok id={id}");
        Ok(())
    }

    pub fn has_books(&self, author: &Author) -> ServiceResult<bool> {
        match author.id {
            Some(id) => Ok(self.books.exists_by_author(id)?),
            None => Ok(false),
        }
    }

    /// Registers an author together with its books, all or nothing.
    ///
    /// Each book is linked to the new author regardless of its own
    /// `author_id`.
    pub fn create_with_books(
        &self,
        author: &Author,
        books: &[Book],
    ) -> ServiceResult<(Author, Vec<Book>)> {
        ensure_unsaved(author)?;
        if books.iter().any(|book| book.id.is_some()) {
            return Err(ServiceError::InvalidArgument(
                "new books must not carry an id".to_string(),
            ));
        }

        let (created, saved_books) = self.scope.run("author_create_with_books", || {
            let created = self.validate_and_save(author)?;
            let mut saved_books = Vec::with_capacity(books.len());
            for book in books {
                let mut linked = book.clone();
                linked.author_id = created.id;
                saved_books.push(self.books.save(&linked)?);
            }
            Ok::<_, ServiceError>((created, saved_books))
        })?;
        info!(
            "event=author_create_with_books module=author status=ok id={} books={}",
            created.id.map(|id| id.to_string()).unwrap_or_default(),
            saved_books.len()
        );
        Ok((created, saved_books))
    }

    fn validate_and_save(&self, author: &Author) -> ServiceResult<Author> {
        author.validate()?;
        self.validator.validate(author)?;
        Ok(self.authors.save(author)?)
    }
}

fn ensure_unsaved(author: &Author) -> ServiceResult<()> {
    if author.id.is_some() {
        return Err(ServiceError::InvalidArgument(
            "a new author must not carry an id".to_string(),
        ));
    }
    Ok(())
}
