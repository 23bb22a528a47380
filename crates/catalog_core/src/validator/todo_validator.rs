use super::{is_duplicate, PreWriteValidator};
use crate::error::{ServiceError, ServiceResult};
use crate::model::todo::Todo;
use crate::repo::todo_repo::TodoRepository;
use log::debug;

/// Keeps todo descriptions unique.
pub struct TodoValidator<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoValidator<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: TodoRepository> PreWriteValidator<Todo> for TodoValidator<R> {
    fn validate(&self, candidate: &Todo) -> ServiceResult<()> {
        let existing = self.repo.find_by_description(&candidate.description)?;
        let matching_id = existing.as_ref().and_then(|todo| todo.id.as_ref());

        if is_duplicate(candidate.id.as_ref(), matching_id) {
            debug!(
                "event=validate module=todo status=duplicate candidate_id={:?} existing_id={:?}",
                candidate.id, matching_id
            );
            return Err(ServiceError::DuplicateRecord(
                "a todo with this description already exists".to_string(),
            ));
        }
        Ok(())
    }
}
