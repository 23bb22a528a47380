//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is deterministic: `name ASC, id ASC`.
//! - `created_at` is written once by the store; `updated_at` moves on every
//!   keyed save.

use super::{parse_uuid, RepoError, RepoResult};
use crate::db::ensure_schema_ready;
use crate::model::author::{Author, AuthorId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use uuid::Uuid;

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    birth_date,
    nationality,
    user_id,
    created_at,
    updated_at
FROM authors";

const AUTHOR_ORDER_SQL: &str = "ORDER BY name ASC, id ASC";

/// Persistence delegate for authors.
pub trait AuthorRepository {
    /// Inserts with a fresh id when `author.id` is `None`, otherwise updates
    /// the keyed row.
    fn save(&self, author: &Author) -> RepoResult<Author>;
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact match on the identifying `(name, birth_date, nationality)` triple.
    fn find_by_identity(
        &self,
        name: &str,
        birth_date: NaiveDate,
        nationality: &str,
    ) -> RepoResult<Option<Author>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Author>>;
    fn find_by_nationality(&self, nationality: &str) -> RepoResult<Vec<Author>>;
    fn find_by_name_and_nationality(
        &self,
        name: &str,
        nationality: &str,
    ) -> RepoResult<Vec<Author>>;
    fn find_all(&self) -> RepoResult<Vec<Author>>;
    fn delete(&self, id: AuthorId) -> RepoResult<()>;
}

#[derive(Clone, Copy)]
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_authors<P: Params>(&self, filter_sql: &str, params: P) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} {filter_sql} {AUTHOR_ORDER_SQL};"))?;
        let mut rows = stmt.query(params)?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn load_required(&self, id: AuthorId) -> RepoResult<Author> {
        self.find_by_id(id)?.ok_or_else(|| not_found(id))
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn save(&self, author: &Author) -> RepoResult<Author> {
        author.validate()?;
        let user_id = author.user_id.map(|value| value.to_string());

        match author.id {
            None => {
                let id = Uuid::new_v4();
                self.conn.execute(
                    "INSERT INTO authors (id, name, birth_date, nationality, user_id)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        id.to_string(),
                        author.name,
                        author.birth_date,
                        author.nationality,
                        user_id,
                    ],
                )?;
                self.load_required(id)
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE authors
                     SET
                        name = ?2,
                        birth_date = ?3,
                        nationality = ?4,
                        user_id = ?5,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?1;",
                    params![
                        id.to_string(),
                        author.name,
                        author.birth_date,
                        author.nationality,
                        user_id,
                    ],
                )?;
                if changed == 0 {
                    return Err(not_found(id));
                }
                self.load_required(id)
            }
        }
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        Ok(self
            .query_authors("WHERE id = ?1", [id.to_string()])?
            .into_iter()
            .next())
    }

    fn find_by_identity(
        &self,
        name: &str,
        birth_date: NaiveDate,
        nationality: &str,
    ) -> RepoResult<Option<Author>> {
        Ok(self
            .query_authors(
                "WHERE name = ?1 AND birth_date = ?2 AND nationality = ?3",
                params![name, birth_date, nationality],
            )?
            .into_iter()
            .next())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Author>> {
        self.query_authors("WHERE name = ?1", [name])
    }

    fn find_by_nationality(&self, nationality: &str) -> RepoResult<Vec<Author>> {
        self.query_authors("WHERE nationality = ?1", [nationality])
    }

    fn find_by_name_and_nationality(
        &self,
        name: &str,
        nationality: &str,
    ) -> RepoResult<Vec<Author>> {
        self.query_authors("WHERE name = ?1 AND nationality = ?2", [name, nationality])
    }

    fn find_all(&self) -> RepoResult<Vec<Author>> {
        self.query_authors("", [])
    }

    fn delete(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

pub(crate) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id_text: String = row.get("id")?;
    let user_id = match row.get::<_, Option<String>>("user_id")? {
        Some(value) => Some(parse_uuid(&value, "authors.user_id")?),
        None => None,
    };

    let author = Author {
        id: Some(parse_uuid(&id_text, "authors.id")?),
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
        nationality: row.get("nationality")?,
        user_id,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    author.validate()?;
    Ok(author)
}

fn not_found(id: AuthorId) -> RepoError {
    RepoError::NotFound {
        entity: "author",
        id: id.to_string(),
    }
}
