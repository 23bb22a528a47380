//! Pre-write invariant checks.
//!
//! # Responsibility
//! - Reject writes that would break a uniqueness invariant before they
//!   reach storage ([`PreWriteValidator`]).
//! - Reject deletes of records that still have dependents
//!   ([`DeleteGuard`]).
//!
//! # Invariants
//! - Checks are read-only.
//! - Checks are only atomic with the following write when the caller runs
//!   both inside one `WriteScope`.

use crate::error::ServiceResult;

pub mod author_validator;
pub mod delete_guard;
pub mod todo_validator;

pub use author_validator::AuthorValidator;
pub use delete_guard::AuthorDeleteGuard;
pub use todo_validator::TodoValidator;

/// Uniqueness check run before a create or update.
pub trait PreWriteValidator<T> {
    /// Fails with `ServiceError::DuplicateRecord` when `candidate` collides
    /// with another stored record.
    fn validate(&self, candidate: &T) -> ServiceResult<()>;
}

/// Referential check run before a delete.
pub trait DeleteGuard<Id> {
    /// Fails with `ServiceError::OperationNotAllowed` while dependents exist.
    fn ensure_deletable(&self, id: &Id) -> ServiceResult<()>;
}

/// Shared decision rule for uniqueness checks.
///
/// `matching_id` is the identity of the stored record that matches the
/// uniqueness predicate, or `None` when nothing matches.
///
/// - no match: no conflict
/// - match, candidate without identity (create): conflict
/// - match, candidate with identity: conflict unless both identities agree
pub fn is_duplicate<Id: PartialEq>(candidate_id: Option<&Id>, matching_id: Option<&Id>) -> bool {
    match (candidate_id, matching_id) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(candidate), Some(existing)) => candidate != existing,
    }
}

#[cfg(test)]
mod tests {
    use super::is_duplicate;

    #[test]
    fn no_match_never_conflicts() {
        assert!(!is_duplicate::<i64>(None, None));
        assert!(!is_duplicate(Some(&7), None));
    }

    #[test]
    fn match_conflicts_with_new_record() {
        assert!(is_duplicate(None, Some(&7)));
    }

    #[test]
    fn match_on_same_identity_is_a_resave() {
        assert!(!is_duplicate(Some(&7), Some(&7)));
    }

    #[test]
    fn match_on_other_identity_conflicts() {
        assert!(is_duplicate(Some(&7), Some(&8)));
    }
}
