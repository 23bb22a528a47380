use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Author, AuthorFilter, Book, BookRepository, Genre, ServiceError, SqliteBookRepository,
    SqliteCatalog,
};
use chrono::NaiveDate;
use rusqlite::Connection;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn mario() -> Author {
    Author::new("Mario", date(1950, 1, 21), "Brazilian")
}

fn author_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_update_and_duplicate_create() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let created = service.create(&mario()).unwrap();
    assert!(created.id.is_some());
    assert!(created.created_at.is_some());

    let resaved = service.update(&created).unwrap();
    assert_eq!(resaved.id, created.id);
    assert!(resaved.updated_at.is_some());

    let err = service.create(&mario()).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateRecord(_)));
    assert_eq!(author_count(&conn), 1);
}

#[test]
fn update_into_another_authors_identity_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    service.create(&mario()).unwrap();
    let mut other = service
        .create(&Author::new("Clarice", date(1920, 12, 10), "Brazilian"))
        .unwrap();

    other.name = "Mario".to_string();
    other.birth_date = date(1950, 1, 21);
    let err = service.update(&other).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateRecord(_)));

    let stored = service.find_by_id(other.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.name, "Clarice");
}

#[test]
fn update_requires_identity_and_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let err = service.update(&mario()).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));

    let mut ghost = mario();
    ghost.id = Some(uuid::Uuid::new_v4());
    let err = service.update(&ghost).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "author", .. }));
}

#[test]
fn create_rejects_overlong_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let long_name = Author::new("x".repeat(101), date(1950, 1, 21), "Brazilian");
    let err = service.create(&long_name).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(author_count(&conn), 0);
}

#[test]
fn delete_is_blocked_while_books_exist() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteCatalog::new(&conn);
    let authors = catalog.authors().unwrap();
    let books = catalog.books().unwrap();

    let author = authors.create(&mario()).unwrap();
    let mut book = Book::new("978-0-00-000000-1", "Sertao", Genre::Fiction);
    book.author_id = author.id;
    let book = books.create(&book).unwrap();
    assert!(authors.has_books(&author).unwrap());

    let err = authors.delete(&author).unwrap_err();
    assert!(matches!(err, ServiceError::OperationNotAllowed(_)));
    assert_eq!(author_count(&conn), 1);

    books.delete_by_id(book.id.unwrap()).unwrap();
    assert!(!authors.has_books(&author).unwrap());
    authors.delete(&author).unwrap();

    assert_eq!(authors.find_by_id(author.id.unwrap()).unwrap(), None);
}

#[test]
fn delete_of_unsaved_or_missing_author_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let err = service.delete(&mario()).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));

    let mut ghost = mario();
    ghost.id = Some(uuid::Uuid::new_v4());
    let err = service.delete(&ghost).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn create_with_books_links_every_book() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let books = vec![
        Book::new("111", "First", Genre::Fiction),
        Book::new("222", "Second", Genre::Mystery),
    ];
    let (author, saved) = service.create_with_books(&mario(), &books).unwrap();

    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|book| book.author_id == author.id));
    let stored = SqliteBookRepository::try_new(&conn)
        .unwrap()
        .find_by_author(author.id.unwrap())
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[test]
fn failed_registration_leaves_nothing_behind() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    let books = vec![
        Book::new("111", "Fine", Genre::Fiction),
        Book::new("not an isbn", "Broken", Genre::Fiction),
    ];
    let err = service.create_with_books(&mario(), &books).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_eq!(author_count(&conn), 0);
    let book_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(book_count, 0);
    assert!(conn.is_autocommit());
}

#[test]
fn search_dispatches_on_present_criteria() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCatalog::new(&conn).authors().unwrap();

    service.create(&mario()).unwrap();
    service
        .create(&Author::new("Mario", date(1960, 3, 3), "Italian"))
        .unwrap();
    service
        .create(&Author::new("Clarice", date(1920, 12, 10), "Brazilian"))
        .unwrap();

    let names = |filter: AuthorFilter| -> Vec<(String, String)> {
        service
            .search(&filter)
            .unwrap()
            .into_iter()
            .map(|author| (author.name, author.nationality))
            .collect()
    };

    assert_eq!(names(AuthorFilter::default()).len(), 3);
    assert_eq!(
        names(AuthorFilter {
            name: Some("Mario".to_string()),
            nationality: None,
        })
        .len(),
        2
    );
    assert_eq!(
        names(AuthorFilter {
            name: None,
            nationality: Some("Brazilian".to_string()),
        }),
        vec![
            ("Clarice".to_string(), "Brazilian".to_string()),
            ("Mario".to_string(), "Brazilian".to_string()),
        ]
    );
    assert_eq!(
        names(AuthorFilter {
            name: Some("Mario".to_string()),
            nationality: Some("Italian".to_string()),
        }),
        vec![("Mario".to_string(), "Italian".to_string())]
    );
    assert_eq!(
        names(AuthorFilter {
            name: Some("  ".to_string()),
            nationality: None,
        })
        .len(),
        3
    );
}
