//! Author record.
//!
//! # Invariants
//! - `(name, birth_date, nationality)` identifies an author; two stored
//!   authors never share the triple.
//! - An author referenced by at least one book is never deleted.
//! - `created_at`/`updated_at` are owned by the store and ignored on write.

use super::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AuthorId = Uuid;

pub const AUTHOR_NAME_MAX_CHARS: usize = 100;
pub const AUTHOR_NATIONALITY_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<AuthorId>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    /// User that registered the author, when known.
    pub user_id: Option<Uuid>,
    /// Epoch ms, set by the store on insert.
    pub created_at: Option<i64>,
    /// Epoch ms, refreshed by the store on every update.
    pub updated_at: Option<i64>,
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        nationality: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date,
            nationality: nationality.into(),
            user_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, Some(AUTHOR_NAME_MAX_CHARS))?;
        require_text(
            "nationality",
            &self.nationality,
            Some(AUTHOR_NATIONALITY_MAX_CHARS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Author;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1950, 1, 21).unwrap()
    }

    #[test]
    fn validate_enforces_column_limits() {
        assert!(Author::new("Mario", birth(), "Brazilian").validate().is_ok());

        let long_name = Author::new("x".repeat(101), birth(), "Brazilian");
        assert_eq!(
            long_name.validate(),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100
            })
        );

        let blank_nationality = Author::new("Mario", birth(), " ");
        assert_eq!(blank_nationality.validate().unwrap_err().field(), "nationality");
    }
}
