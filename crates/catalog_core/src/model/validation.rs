use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level rule violation found before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text is empty after trim.
    Blank { field: &'static str },
    /// Text exceeds the column limit (in characters).
    TooLong { field: &'static str, max: usize },
    /// Value does not match the expected format.
    Malformed { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field, as exposed to API callers.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } | Self::Malformed { field, .. } => {
                field
            }
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::Malformed { field, reason } => write!(f, "{field} is malformed: {reason}"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn require_text_checks_blank_then_length() {
        assert_eq!(
            require_text("name", "   ", Some(3)),
            Err(ValidationError::Blank { field: "name" })
        );
        assert_eq!(
            require_text("name", "abcd", Some(3)),
            Err(ValidationError::TooLong {
                field: "name",
                max: 3
            })
        );
        assert!(require_text("name", "ábc", Some(3)).is_ok());
        assert!(require_text("name", "anything", None).is_ok());
    }
}
