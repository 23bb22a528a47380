//! Todo record.
//!
//! # Invariants
//! - `description` is unique among stored todos (enforced by
//!   `TodoValidator`, not by the record itself).

use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned integer identity.
pub type TodoId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Option<TodoId>,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an unsaved, not yet completed todo.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
            completed: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("description", &self.description, None)
    }

    /// Human-readable status used in notifications.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "completed"
        } else {
            "not completed"
        }
    }
}
