//! Use-case services.
//!
//! # Responsibility
//! - Sequence validators, guards, persistence and notifications.
//! - Keep request handlers decoupled from storage details.
//!
//! Collaborators are passed in through constructors; services hold no
//! state between calls.

pub mod author_service;
pub mod book_service;
pub mod notifier;
pub mod product_service;
pub mod todo_service;
