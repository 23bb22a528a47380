use super::DeleteGuard;
use crate::error::{ServiceError, ServiceResult};
use crate::model::author::AuthorId;
use crate::repo::book_repo::BookRepository;
use log::debug;

/// Blocks deleting an author that still has books.
pub struct AuthorDeleteGuard<B: BookRepository> {
    books: B,
}

impl<B: BookRepository> AuthorDeleteGuard<B> {
    pub fn new(books: B) -> Self {
        Self { books }
    }
}

impl<B: BookRepository> DeleteGuard<AuthorId> for AuthorDeleteGuard<B> {
    fn ensure_deletable(&self, id: &AuthorId) -> ServiceResult<()> {
        if self.books.exists_by_author(*id)? {
            debug!("event=delete_guard module=author status=blocked author_id={id}");
            return Err(ServiceError::OperationNotAllowed(
                "authors with registered books cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}
