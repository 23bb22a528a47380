//! Todo repository contract and SQLite implementation.

use super::{bool_to_int, int_to_bool, RepoError, RepoResult};
use crate::db::ensure_schema_ready;
use crate::model::todo::{Todo, TodoId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TODO_SELECT_SQL: &str = "SELECT id, description, completed FROM todos";

/// Persistence delegate for todos.
pub trait TodoRepository {
    /// Inserts when `todo.id` is `None`, otherwise updates the keyed row.
    fn save(&self, todo: &Todo) -> RepoResult<Todo>;
    fn find_by_id(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Returns the oldest todo with exactly this description.
    fn find_by_description(&self, description: &str) -> RepoResult<Option<Todo>>;
    /// Sets only the completion flag and returns the updated row.
    fn set_completed(&self, id: TodoId, completed: bool) -> RepoResult<Todo>;
}

#[derive(Clone, Copy)]
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Creates a repository over a fully migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn load_required(&self, id: TodoId) -> RepoResult<Todo> {
        self.find_by_id(id)?.ok_or_else(|| RepoError::NotFound {
            entity: "todo",
            id: id.to_string(),
        })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn save(&self, todo: &Todo) -> RepoResult<Todo> {
        todo.validate()?;

        match todo.id {
            None => {
                self.conn.execute(
                    "INSERT INTO todos (description, completed) VALUES (?1, ?2);",
                    params![todo.description, bool_to_int(todo.completed)],
                )?;
                self.load_required(self.conn.last_insert_rowid())
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE todos SET description = ?2, completed = ?3 WHERE id = ?1;",
                    params![id, todo.description, bool_to_int(todo.completed)],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "todo",
                        id: id.to_string(),
                    });
                }
                self.load_required(id)
            }
        }
    }

    fn find_by_id(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let row = self
            .conn
            .query_row(
                &format!("{TODO_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_todo_row,
            )
            .optional()?;
        row.map(TodoRow::into_todo).transpose()
    }

    fn find_by_description(&self, description: &str) -> RepoResult<Option<Todo>> {
        let row = self
            .conn
            .query_row(
                &format!("{TODO_SELECT_SQL} WHERE description = ?1 ORDER BY id ASC LIMIT 1;"),
                [description],
                read_todo_row,
            )
            .optional()?;
        row.map(TodoRow::into_todo).transpose()
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> RepoResult<Todo> {
        let changed = self.conn.execute(
            "UPDATE todos SET completed = ?2 WHERE id = ?1;",
            params![id, bool_to_int(completed)],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "todo",
                id: id.to_string(),
            });
        }
        self.load_required(id)
    }
}

struct TodoRow {
    id: TodoId,
    description: String,
    completed: i64,
}

impl TodoRow {
    fn into_todo(self) -> RepoResult<Todo> {
        Ok(Todo {
            id: Some(self.id),
            description: self.description,
            completed: int_to_bool(self.completed, "todos.completed")?,
        })
    }
}

fn read_todo_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get("id")?,
        description: row.get("description")?,
        completed: row.get("completed")?,
    })
}
