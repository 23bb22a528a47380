use super::{location, parse_id, parse_param, respond, wired, CatalogApi};
use crate::dto::{AffectedRows, AuthorDto, BookRequest, BookSearchRequest};
use crate::response::ApiResponse;
use catalog_core::{BookFilter, BookId, BookOrder, Genre, Notifier};
use chrono::NaiveDate;

impl<N: Notifier> CatalogApi<'_, N> {
    /// `201` with the stored book; `400` when the referenced author is
    /// unknown.
    pub fn create_book(&self, request: &BookRequest) -> ApiResponse {
        let result =
            wired(self.catalog.books()).and_then(|service| service.create(&request.to_book()));
        respond("book_create", result, |book| {
            ApiResponse::created_with_body(location("books", book.id), &book)
        })
    }

    pub fn get_book(&self, id: &str) -> ApiResponse {
        let id: BookId = match parse_id("book", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result = wired(self.catalog.books()).and_then(|service| service.find_by_id(id));
        respond("book_get", result, |found| match found {
            Some(book) => ApiResponse::ok(&book),
            None => ApiResponse::not_found(),
        })
    }

    /// `204` on success, `404` for an unknown book.
    pub fn update_book(&self, id: &str, request: &BookRequest) -> ApiResponse {
        let id: BookId = match parse_id("book", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let mut book = request.to_book();
        book.id = Some(id);
        let result = wired(self.catalog.books()).and_then(|service| service.update(&book));
        respond("book_update", result, |_| ApiResponse::no_content())
    }

    /// `204` on success, `404` for an unknown book.
    pub fn delete_book(&self, id: &str) -> ApiResponse {
        let id: BookId = match parse_id("book", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result = wired(self.catalog.books()).and_then(|service| service.delete_by_id(id));
        respond("book_delete", result, |()| ApiResponse::no_content())
    }

    /// `400` for a half-open range or an unsupported combination.
    pub fn search_books(&self, request: &BookSearchRequest) -> ApiResponse {
        let published_between = match (request.published_from, request.published_to) {
            (Some(start), Some(end)) => Some((start, end)),
            (None, None) => None,
            _ => {
                return ApiResponse::bad_request(
                    "publication range needs both published_from and published_to",
                )
            }
        };
        let filter = BookFilter {
            title: request.title.clone(),
            isbn: request.isbn.clone(),
            price: request.price,
            published_between,
        };
        let result = wired(self.catalog.books()).and_then(|service| service.search(&filter));
        respond("book_search", result, |books| ApiResponse::ok(&books))
    }

    /// Books of one genre, sorted by `order` (`title` when absent).
    pub fn books_by_genre(&self, genre: &str, order: Option<&str>) -> ApiResponse {
        let genre: Genre = match parse_param("genre", genre) {
            Ok(genre) => genre,
            Err(response) => return response,
        };
        let order: BookOrder = match order.map(|raw| parse_param::<BookOrder>("order", raw)).transpose() {
            Ok(order) => order.unwrap_or_default(),
            Err(response) => return response,
        };
        let result =
            wired(self.catalog.books()).and_then(|service| service.books_by_genre(genre, order));
        respond("book_by_genre", result, |books| ApiResponse::ok(&books))
    }

    pub fn books_by_author(&self, author_id: &str) -> ApiResponse {
        let author_id = match parse_id("author", author_id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result =
            wired(self.catalog.books()).and_then(|service| service.books_by_author(author_id));
        respond("book_by_author", result, |books| ApiResponse::ok(&books))
    }

    pub fn distinct_book_titles(&self) -> ApiResponse {
        let result = wired(self.catalog.books()).and_then(|service| service.distinct_titles());
        respond("book_titles", result, |titles| ApiResponse::ok(&titles))
    }

    pub fn authors_with_books(&self) -> ApiResponse {
        let result = wired(self.catalog.books()).and_then(|service| service.authors_with_books());
        respond("book_authors", result, |authors| {
            let dtos: Vec<AuthorDto> = authors.into_iter().map(AuthorDto::from).collect();
            ApiResponse::ok(&dtos)
        })
    }

    pub fn genres_by_author_nationality(&self, nationality: &str) -> ApiResponse {
        let result = wired(self.catalog.books())
            .and_then(|service| service.genres_by_author_nationality(nationality));
        respond("book_genres", result, |genres| ApiResponse::ok(&genres))
    }

    pub fn delete_books_by_genre(&self, genre: &str) -> ApiResponse {
        let genre: Genre = match parse_param("genre", genre) {
            Ok(genre) => genre,
            Err(response) => return response,
        };
        let result = wired(self.catalog.books()).and_then(|service| service.delete_by_genre(genre));
        respond("book_delete_by_genre", result, |affected| {
            ApiResponse::ok(&AffectedRows { affected })
        })
    }

    pub fn set_publication_dates(&self, date: NaiveDate) -> ApiResponse {
        let result =
            wired(self.catalog.books()).and_then(|service| service.update_publication_date(date));
        respond("book_set_publication_date", result, |affected| {
            ApiResponse::ok(&AffectedRows { affected })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::{BookRequest, BookSearchRequest};
    use crate::CatalogApi;
    use catalog_core::db::open_db_in_memory;
    use catalog_core::Genre;
    use chrono::NaiveDate;
    use serde_json::json;

    fn book(isbn: &str, title: &str, genre: Genre, price: &str) -> BookRequest {
        BookRequest {
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            genre,
            price: Some(price.parse().unwrap()),
            author_id: None,
        }
    }

    #[test]
    fn create_update_and_fetch() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let created = api.create_book(&book("123", "Draft", Genre::Science, "10"));
        assert_eq!(created.status, 201);
        let body = created.body.unwrap();
        assert_eq!(body["price"], json!("10.00"));
        let id = body["id"].as_str().unwrap().to_string();
        assert_eq!(created.location, Some(format!("/books/{id}")));

        assert_eq!(
            api.update_book(&id, &book("123", "Final", Genre::Science, "12.5"))
                .status,
            204
        );
        let fetched = api.get_book(&id).body.unwrap();
        assert_eq!(fetched["title"], json!("Final"));
        assert_eq!(fetched["price"], json!("12.50"));

        let missing = uuid::Uuid::new_v4().to_string();
        assert_eq!(
            api.update_book(&missing, &book("111", "X", Genre::Science, "1"))
                .status,
            404
        );
        assert_eq!(api.get_book(&missing).status, 404);
    }

    #[test]
    fn unknown_author_reference_is_a_bad_request() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let mut request = book("123", "Orphan", Genre::Fiction, "1");
        request.author_id = Some(uuid::Uuid::new_v4());
        assert_eq!(api.create_book(&request).status, 400);
    }

    #[test]
    fn search_validates_filter_shape() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);
        api.create_book(&book("123", "Alpha", Genre::Fiction, "10"));

        let by_title = api.search_books(&BookSearchRequest {
            title: Some("Alpha".to_string()),
            ..BookSearchRequest::default()
        });
        assert_eq!(by_title.body.unwrap().as_array().unwrap().len(), 1);

        let half_range = api.search_books(&BookSearchRequest {
            published_from: NaiveDate::from_ymd_opt(2000, 1, 1),
            ..BookSearchRequest::default()
        });
        assert_eq!(half_range.status, 400);

        let price_only = api.search_books(&BookSearchRequest {
            price: Some("10".parse().unwrap()),
            ..BookSearchRequest::default()
        });
        assert_eq!(price_only.status, 400);
    }

    #[test]
    fn genre_operations() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);
        api.create_book(&book("11", "B", Genre::Fiction, "20"));
        api.create_book(&book("22", "A", Genre::Fiction, "10"));

        let sorted = api.books_by_genre("fiction", Some("price")).body.unwrap();
        assert_eq!(sorted[0]["isbn"], json!("22"));
        assert_eq!(api.books_by_genre("poetry", None).status, 400);
        assert_eq!(api.books_by_genre("fiction", Some("weight")).status, 400);

        let deleted = api.delete_books_by_genre("FICTION");
        assert_eq!(deleted.body.unwrap(), json!({ "affected": 2 }));
    }
}
