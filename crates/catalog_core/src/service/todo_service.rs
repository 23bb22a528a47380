//! Todo use-case service.
//!
//! # Invariants
//! - `create` validates and inserts inside one write scope.
//! - `update_status` touches only the completion flag and skips the
//!   uniqueness check; a notification follows every successful update.

use super::notifier::Notifier;
use crate::db::WriteScope;
use crate::error::{ServiceError, ServiceResult};
use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::TodoRepository;
use crate::validator::{PreWriteValidator, TodoValidator};
use log::info;

pub struct TodoService<R: TodoRepository, N: Notifier, S: WriteScope> {
    repo: R,
    validator: TodoValidator<R>,
    notifier: N,
    scope: S,
}

impl<R: TodoRepository, N: Notifier, S: WriteScope> TodoService<R, N, S> {
    pub fn new(repo: R, validator: TodoValidator<R>, notifier: N, scope: S) -> Self {
        Self {
            repo,
            validator,
            notifier,
            scope,
        }
    }

    /// Stores a new todo and returns it with its assigned id.
    pub fn create(&self, todo: &Todo) -> ServiceResult<Todo> {
        if todo.id.is_some() {
            return Err(ServiceError::InvalidArgument(
                "a new todo must not carry an id".to_string(),
            ));
        }

        let created = self.scope.run("todo_create", || {
            self.validator.validate(todo)?;
            Ok::<_, ServiceError>(self.repo.save(todo)?)
        })?;
        info!(
            "event=todo_create module=todo status=ok id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    /// Sets the completion flag and notifies about the new status.
    pub fn update_status(&self, id: TodoId, completed: bool) -> ServiceResult<Todo> {
        let updated = self.scope.run("todo_update_status", || {
            Ok::<_, ServiceError>(self.repo.set_completed(id, completed)?)
        })?;
        self.notifier.send(&format!(
            "Todo {} was updated to {}",
            updated.description,
            updated.status_label()
        ));
        Ok(updated)
    }

    pub fn find_by_id(&self, id: TodoId) -> ServiceResult<Option<Todo>> {
        Ok(self.repo.find_by_id(id)?)
    }
}
