//! Book record and genre catalog.

use super::author::AuthorId;
use super::price::Price;
use super::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub type BookId = Uuid;

pub const BOOK_ISBN_MAX_CHARS: usize = 20;
pub const BOOK_TITLE_MAX_CHARS: usize = 150;

static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9][0-9-]*[0-9Xx]$").expect("valid isbn regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Fiction,
    Fantasy,
    Mystery,
    Romance,
    Biography,
    Science,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Fiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Romance,
        Genre::Biography,
        Genre::Science,
    ];

    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "fiction",
            Self::Fantasy => "fantasy",
            Self::Mystery => "mystery",
            Self::Romance => "romance",
            Self::Biography => "biography",
            Self::Science => "science",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str() == normalized)
            .ok_or_else(|| ValidationError::Malformed {
                field: "genre",
                reason: format!("unknown genre `{}`", value.trim()),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub isbn: String,
    pub title: String,
    pub publication_date: Option<NaiveDate>,
    pub genre: Genre,
    pub price: Option<Price>,
    pub author_id: Option<AuthorId>,
}

impl Book {
    /// Creates an unsaved book without author, date or price.
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, genre: Genre) -> Self {
        Self {
            id: None,
            isbn: isbn.into(),
            title: title.into(),
            publication_date: None,
            genre,
            price: None,
            author_id: None,
        }
    }

    /// Checks column limits and the ISBN shape (digits and hyphens, with an
    /// optional trailing `X` check digit).
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("isbn", &self.isbn, Some(BOOK_ISBN_MAX_CHARS))?;
        if !ISBN_RE.is_match(&self.isbn) {
            return Err(ValidationError::Malformed {
                field: "isbn",
                reason: "expected digits and hyphens".to_string(),
            });
        }
        require_text("title", &self.title, Some(BOOK_TITLE_MAX_CHARS))
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, Genre};
    use crate::model::ValidationError;

    #[test]
    fn genre_parses_case_insensitively() {
        assert_eq!(" Science ".parse::<Genre>().unwrap(), Genre::Science);
        assert_eq!(
            "poetry".parse::<Genre>().unwrap_err().field(),
            "genre"
        );
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn validate_checks_isbn_shape_and_title() {
        assert!(Book::new("91293-2132", "UFO", Genre::Fiction).validate().is_ok());
        assert!(Book::new("0-306-40615-X", "UFO", Genre::Fiction).validate().is_ok());

        let bad_isbn = Book::new("isbn-1", "UFO", Genre::Fiction);
        assert!(matches!(
            bad_isbn.validate(),
            Err(ValidationError::Malformed { field: "isbn", .. })
        ));

        let long_isbn = Book::new("1".repeat(21), "UFO", Genre::Fiction);
        assert!(matches!(
            long_isbn.validate(),
            Err(ValidationError::TooLong { field: "isbn", .. })
        ));

        let blank_title = Book::new("91293-2132", "", Genre::Fiction);
        assert_eq!(blank_title.validate().unwrap_err().field(), "title");
    }
}
