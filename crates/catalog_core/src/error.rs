//! Service-level error taxonomy.
//!
//! Validators, guards and services signal these synchronously; only the
//! request/response layer turns them into transport status codes. No error
//! here is retried.

use crate::db::DbError;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// A uniqueness invariant would be violated by the write.
    DuplicateRecord(String),
    /// A referential or business precondition does not hold.
    OperationNotAllowed(String),
    /// The request itself is malformed (e.g. update without identity).
    InvalidArgument(String),
    /// A keyed write targeted a missing record. Plain lookups return
    /// `Option` instead.
    NotFound { entity: &'static str, id: String },
    /// A record field breaks its own rules.
    Validation(ValidationError),
    /// Storage failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateRecord(message)
            | Self::OperationNotAllowed(message)
            | Self::InvalidArgument(message) => f.write_str(message),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
