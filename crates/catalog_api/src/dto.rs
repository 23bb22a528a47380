//! Request and response payloads.
//!
//! Requests never carry identity: ids arrive separately as strings and are
//! parsed by the handlers.

use catalog_core::{Author, AuthorId, Book, Genre, Price, Todo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoRequest {
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TodoStatusRequest {
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl AuthorRequest {
    pub fn to_author(&self) -> Author {
        let mut author = Author::new(self.name.clone(), self.birth_date, self.nationality.clone());
        author.user_id = self.user_id;
        author
    }

    /// Copies the editable fields onto a stored author, keeping its identity.
    pub fn apply_to(&self, author: &mut Author) {
        author.name.clone_from(&self.name);
        author.birth_date = self.birth_date;
        author.nationality.clone_from(&self.nationality);
        if self.user_id.is_some() {
            author.user_id = self.user_id;
        }
    }
}

/// Author together with the books registered alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorRegistrationRequest {
    pub author: AuthorRequest,
    #[serde(default)]
    pub books: Vec<BookRequest>,
}

/// Public author view; audit fields stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDto {
    pub id: Option<AuthorId>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            birth_date: author.birth_date,
            nationality: author.nationality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRequest {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    pub genre: Genre,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub author_id: Option<AuthorId>,
}

impl BookRequest {
    pub fn to_book(&self) -> Book {
        let mut book = Book::new(self.isbn.clone(), self.title.clone(), self.genre);
        book.publication_date = self.publication_date;
        book.price = self.price;
        book.author_id = self.author_id;
        book
    }
}

/// Book search criteria. A publication range needs both bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookSearchRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub published_from: Option<NaiveDate>,
    #[serde(default)]
    pub published_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoDto {
    pub id: Option<i64>,
    pub description: String,
    pub completed: bool,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

/// Registration result: the author plus its stored books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationDto {
    pub author: AuthorDto,
    pub books: Vec<Book>,
}

/// Row count reported by bulk writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffectedRows {
    pub affected: usize,
}

#[cfg(test)]
mod tests {
    use super::{AuthorRequest, BookRequest};
    use catalog_core::Genre;

    #[test]
    fn author_request_parses_iso_dates() {
        let request: AuthorRequest = serde_json::from_str(
            r#"{"name":"Mario","birth_date":"1950-01-21","nationality":"Brazilian"}"#,
        )
        .unwrap();
        let author = request.to_author();

        assert_eq!(author.id, None);
        assert_eq!(author.birth_date.to_string(), "1950-01-21");
    }

    #[test]
    fn book_request_defaults_optional_fields() {
        let request: BookRequest =
            serde_json::from_str(r#"{"isbn":"123","title":"UFO","genre":"science"}"#).unwrap();
        let book = request.to_book();

        assert_eq!(book.genre, Genre::Science);
        assert!(book.price.is_none());
        assert!(book.author_id.is_none());
    }
}
