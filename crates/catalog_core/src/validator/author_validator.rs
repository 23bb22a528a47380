use super::{is_duplicate, PreWriteValidator};
use crate::error::{ServiceError, ServiceResult};
use crate::model::author::Author;
use crate::repo::author_repo::AuthorRepository;
use log::debug;

/// Keeps the `(name, birth_date, nationality)` triple unique across authors.
///
/// An author being re-saved under its own id matches itself and passes.
pub struct AuthorValidator<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorValidator<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: AuthorRepository> PreWriteValidator<Author> for AuthorValidator<R> {
    fn validate(&self, candidate: &Author) -> ServiceResult<()> {
        let existing = self.repo.find_by_identity(
            &candidate.name,
            candidate.birth_date,
            &candidate.nationality,
        )?;
        let matching_id = existing.as_ref().and_then(|author| author.id.as_ref());

        if is_duplicate(candidate.id.as_ref(), matching_id) {
            debug!(
                "event=validate module=author status=duplicate candidate_id={:?} existing_id={:?}",
                candidate.id, matching_id
            );
            return Err(ServiceError::DuplicateRecord(
                "author already registered".to_string(),
            ));
        }
        Ok(())
    }
}
