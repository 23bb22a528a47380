//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist books and their optional author reference.
//! - Expose the named query predicates used by the library use-cases.
//!
//! # Invariants
//! - Lists default to `title ASC, id ASC` unless the predicate names an order.
//! - `publication_date BETWEEN start AND end` is inclusive on both ends.
//! - Ordering columns come from [`BookOrder`], never from caller text.

use super::author_repo::parse_author_row;
use super::{parse_uuid, RepoError, RepoResult};
use crate::db::ensure_schema_ready;
use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId, Genre};
use crate::model::price::Price;
use crate::model::ValidationError;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use std::str::FromStr;
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    isbn,
    title,
    publication_date,
    genre,
    price_cents,
    author_id
FROM books";

/// Sort key accepted by [`BookRepository::find_by_genre`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookOrder {
    #[default]
    Title,
    PublicationDate,
    Price,
    Isbn,
}

impl BookOrder {
    fn order_sql(self) -> &'static str {
        match self {
            Self::Title => "ORDER BY title ASC, id ASC",
            Self::PublicationDate => "ORDER BY publication_date ASC, id ASC",
            Self::Price => "ORDER BY price_cents ASC, id ASC",
            Self::Isbn => "ORDER BY isbn ASC, id ASC",
        }
    }
}

impl FromStr for BookOrder {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "publication_date" => Ok(Self::PublicationDate),
            "price" => Ok(Self::Price),
            "isbn" => Ok(Self::Isbn),
            other => Err(ValidationError::Malformed {
                field: "order",
                reason: format!("unknown book order `{other}`"),
            }),
        }
    }
}

/// Persistence delegate for books.
pub trait BookRepository {
    /// Inserts with a fresh id when `book.id` is `None`, otherwise updates
    /// the keyed row.
    fn save(&self, book: &Book) -> RepoResult<Book>;
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn delete_by_id(&self, id: BookId) -> RepoResult<()>;
    fn exists_by_author(&self, author_id: AuthorId) -> RepoResult<bool>;
    fn find_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Book>>;
    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Book>>;
    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Vec<Book>>;
    fn find_by_title_and_price(&self, title: &str, price: Price) -> RepoResult<Vec<Book>>;
    fn find_by_title_or_isbn(&self, title: &str, isbn: &str) -> RepoResult<Vec<Book>>;
    fn find_by_publication_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Book>>;
    fn list_ordered_by_title_and_price(&self) -> RepoResult<Vec<Book>>;
    /// Distinct authors referenced by at least one book.
    fn list_authors_of_books(&self) -> RepoResult<Vec<Author>>;
    fn list_distinct_titles(&self) -> RepoResult<Vec<String>>;
    /// Genre of every book whose author has `nationality`, ordered by genre.
    fn list_genres_by_author_nationality(&self, nationality: &str) -> RepoResult<Vec<Genre>>;
    fn find_by_genre(&self, genre: Genre, order: BookOrder) -> RepoResult<Vec<Book>>;
    /// Returns the number of deleted rows.
    fn delete_by_genre(&self, genre: Genre) -> RepoResult<usize>;
    /// Sets `publication_date` on every book; returns the number of rows.
    fn update_publication_date(&self, date: NaiveDate) -> RepoResult<usize>;
}

#[derive(Clone, Copy)]
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_books<P: Params>(&self, tail_sql: &str, params: P) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} {tail_sql};"))?;
        let mut rows = stmt.query(params)?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn load_required(&self, id: BookId) -> RepoResult<Book> {
        self.find_by_id(id)?.ok_or_else(|| not_found(id))
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save(&self, book: &Book) -> RepoResult<Book> {
        book.validate()?;
        let author_id = book.author_id.map(|value| value.to_string());
        let price_cents = book.price.map(Price::cents);

        match book.id {
            None => {
                let id = Uuid::new_v4();
                self.conn.execute(
                    "INSERT INTO books (
                        id,
                        isbn,
                        title,
                        publication_date,
                        genre,
                        price_cents,
                        author_id
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                    params![
                        id.to_string(),
                        book.isbn,
                        book.title,
                        book.publication_date,
                        book.genre.as_str(),
                        price_cents,
                        author_id,
                    ],
                )?;
                self.load_required(id)
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE books
                     SET
                        isbn = ?2,
                        title = ?3,
                        publication_date = ?4,
                        genre = ?5,
                        price_cents = ?6,
                        author_id = ?7
                     WHERE id = ?1;",
                    params![
                        id.to_string(),
                        book.isbn,
                        book.title,
                        book.publication_date,
                        book.genre.as_str(),
                        price_cents,
                        author_id,
                    ],
                )?;
                if changed == 0 {
                    return Err(not_found(id));
                }
                self.load_required(id)
            }
        }
    }

    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        Ok(self
            .query_books("WHERE id = ?1", [id.to_string()])?
            .into_iter()
            .next())
    }

    fn delete_by_id(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn exists_by_author(&self, author_id: AuthorId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE author_id = ?1);",
            [author_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Book>> {
        self.query_books(
            "WHERE author_id = ?1 ORDER BY title ASC, id ASC",
            [author_id.to_string()],
        )
    }

    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Book>> {
        self.query_books("WHERE title = ?1 ORDER BY title ASC, id ASC", [title])
    }

    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Vec<Book>> {
        self.query_books("WHERE isbn = ?1 ORDER BY title ASC, id ASC", [isbn])
    }

    fn find_by_title_and_price(&self, title: &str, price: Price) -> RepoResult<Vec<Book>> {
        self.query_books(
            "WHERE title = ?1 AND price_cents = ?2 ORDER BY title ASC, id ASC",
            params![title, price.cents()],
        )
    }

    fn find_by_title_or_isbn(&self, title: &str, isbn: &str) -> RepoResult<Vec<Book>> {
        self.query_books(
            "WHERE title = ?1 OR isbn = ?2 ORDER BY title ASC, id ASC",
            [title, isbn],
        )
    }

    fn find_by_publication_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Book>> {
        self.query_books(
            "WHERE publication_date BETWEEN ?1 AND ?2 ORDER BY title ASC, id ASC",
            [start, end],
        )
    }

    fn list_ordered_by_title_and_price(&self) -> RepoResult<Vec<Book>> {
        self.query_books("ORDER BY title ASC, price_cents ASC, id ASC", [])
    }

    fn list_authors_of_books(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT
                a.id AS id,
                a.name AS name,
                a.birth_date AS birth_date,
                a.nationality AS nationality,
                a.user_id AS user_id,
                a.created_at AS created_at,
                a.updated_at AS updated_at
             FROM books b
             JOIN authors a ON a.id = b.author_id
             ORDER BY a.name ASC, a.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn list_distinct_titles(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT title FROM books ORDER BY title ASC;")?;
        let titles = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(titles)
    }

    fn list_genres_by_author_nationality(&self, nationality: &str) -> RepoResult<Vec<Genre>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.genre
             FROM books b
             JOIN authors a ON a.id = b.author_id
             WHERE a.nationality = ?1
             ORDER BY b.genre ASC;",
        )?;
        let raw = stmt
            .query_map([nationality], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        raw.iter()
            .map(String::as_str)
            .map(parse_genre)
            .collect()
    }

    fn find_by_genre(&self, genre: Genre, order: BookOrder) -> RepoResult<Vec<Book>> {
        self.query_books(
            &format!("WHERE genre = ?1 {}", order.order_sql()),
            [genre.as_str()],
        )
    }

    fn delete_by_genre(&self, genre: Genre) -> RepoResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM books WHERE genre = ?1;", [genre.as_str()])?)
    }

    fn update_publication_date(&self, date: NaiveDate) -> RepoResult<usize> {
        Ok(self
            .conn
            .execute("UPDATE books SET publication_date = ?1;", [date])?)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id_text: String = row.get("id")?;
    let genre_text: String = row.get("genre")?;
    let author_id = match row.get::<_, Option<String>>("author_id")? {
        Some(value) => Some(parse_uuid(&value, "books.author_id")?),
        None => None,
    };
    let price = match row.get::<_, Option<i64>>("price_cents")? {
        Some(cents) => Some(Price::from_cents(cents).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid price `{cents}` in books.price_cents"))
        })?),
        None => None,
    };

    let book = Book {
        id: Some(parse_uuid(&id_text, "books.id")?),
        isbn: row.get("isbn")?,
        title: row.get("title")?,
        publication_date: row.get("publication_date")?,
        genre: parse_genre(&genre_text)?,
        price,
        author_id,
    };
    book.validate()?;
    Ok(book)
}

fn parse_genre(value: &str) -> RepoResult<Genre> {
    value
        .parse()
        .map_err(|_| RepoError::InvalidData(format!("invalid genre `{value}` in books.genre")))
}

fn not_found(id: BookId) -> RepoError {
    RepoError::NotFound {
        entity: "book",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::BookOrder;

    #[test]
    fn book_order_parses_known_keys_only() {
        assert_eq!("price".parse::<BookOrder>().unwrap(), BookOrder::Price);
        assert_eq!(
            " Publication_Date ".parse::<BookOrder>().unwrap(),
            BookOrder::PublicationDate
        );
        assert!("title; DROP TABLE books".parse::<BookOrder>().is_err());
    }
}
