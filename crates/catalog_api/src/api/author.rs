use super::{location, parse_id, respond, wired, CatalogApi};
use crate::dto::{AuthorDto, AuthorRegistrationRequest, AuthorRequest, RegistrationDto};
use crate::response::ApiResponse;
use catalog_core::{AuthorFilter, AuthorId, Book, Notifier};

impl<N: Notifier> CatalogApi<'_, N> {
    /// `201` with the new author's location, `409` on a duplicate.
    pub fn create_author(&self, request: &AuthorRequest) -> ApiResponse {
        let result =
            wired(self.catalog.authors()).and_then(|service| service.create(&request.to_author()));
        respond("author_create", result, |author| {
            ApiResponse::created(location("authors", author.id))
        })
    }

    /// Registers an author with its books in one step.
    pub fn register_author(&self, request: &AuthorRegistrationRequest) -> ApiResponse {
        let books: Vec<Book> = request.books.iter().map(|book| book.to_book()).collect();
        let result = wired(self.catalog.authors())
            .and_then(|service| service.create_with_books(&request.author.to_author(), &books));
        respond("author_register", result, |(author, books)| {
            ApiResponse::created_with_body(
                location("authors", author.id),
                &RegistrationDto {
                    author: AuthorDto::from(author),
                    books,
                },
            )
        })
    }

    pub fn get_author(&self, id: &str) -> ApiResponse {
        let id: AuthorId = match parse_id("author", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result = wired(self.catalog.authors()).and_then(|service| service.find_by_id(id));
        respond("author_get", result, |found| match found {
            Some(author) => ApiResponse::ok(&AuthorDto::from(author)),
            None => ApiResponse::not_found(),
        })
    }

    pub fn search_authors(&self, name: Option<&str>, nationality: Option<&str>) -> ApiResponse {
        let filter = AuthorFilter {
            name: name.map(str::to_string),
            nationality: nationality.map(str::to_string),
        };
        let result = wired(self.catalog.authors()).and_then(|service| service.search(&filter));
        respond("author_search", result, |authors| {
            let dtos: Vec<AuthorDto> = authors.into_iter().map(AuthorDto::from).collect();
            ApiResponse::ok(&dtos)
        })
    }

    /// `204` on success, `404` for an unknown author, `409` when the new
    /// fields collide with another author.
    pub fn update_author(&self, id: &str, request: &AuthorRequest) -> ApiResponse {
        let id: AuthorId = match parse_id("author", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let service = match wired(self.catalog.authors()) {
            Ok(service) => service,
            Err(err) => return ApiResponse::from_error(&err),
        };

        let result = service.find_by_id(id).and_then(|found| {
            found
                .map(|mut author| {
                    request.apply_to(&mut author);
                    service.update(&author)
                })
                .transpose()
        });
        respond("author_update", result, |updated| match updated {
            Some(_) => ApiResponse::no_content(),
            None => ApiResponse::not_found(),
        })
    }

    /// `204` on success, `404` for an unknown author, `400` while the
    /// author still has books.
    pub fn delete_author(&self, id: &str) -> ApiResponse {
        let id: AuthorId = match parse_id("author", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let service = match wired(self.catalog.authors()) {
            Ok(service) => service,
            Err(err) => return ApiResponse::from_error(&err),
        };

        let result = service.find_by_id(id).and_then(|found| {
            found
                .map(|author| service.delete(&author))
                .transpose()
        });
        respond("author_delete", result, |deleted| match deleted {
            Some(()) => ApiResponse::no_content(),
            None => ApiResponse::not_found(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::{AuthorRegistrationRequest, AuthorRequest, BookRequest};
    use crate::CatalogApi;
    use catalog_core::db::open_db_in_memory;
    use catalog_core::Genre;
    use chrono::NaiveDate;
    use serde_json::json;

    fn mario() -> AuthorRequest {
        AuthorRequest {
            name: "Mario".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1950, 1, 21).unwrap(),
            nationality: "Brazilian".to_string(),
            user_id: None,
        }
    }

    fn author_id(location: Option<String>) -> String {
        location
            .unwrap()
            .strip_prefix("/authors/")
            .unwrap()
            .to_string()
    }

    #[test]
    fn create_returns_location_and_rejects_duplicates() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let created = api.create_author(&mario());
        assert_eq!(created.status, 201);
        assert!(created.body.is_none());
        let id = author_id(created.location);

        let fetched = api.get_author(&id);
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body.unwrap()["birth_date"], json!("1950-01-21"));

        let duplicate = api.create_author(&mario());
        assert_eq!(duplicate.status, 409);
        assert_eq!(duplicate.body.unwrap()["message"], json!("author already registered"));
    }

    #[test]
    fn update_maps_outcomes() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);
        let id = author_id(api.create_author(&mario()).location);

        assert_eq!(api.update_author(&id, &mario()).status, 204);

        let mut other = mario();
        other.name = "Clarice".to_string();
        let other_id = author_id(api.create_author(&other).location);
        assert_eq!(api.update_author(&other_id, &mario()).status, 409);

        let missing = uuid::Uuid::new_v4().to_string();
        assert_eq!(api.update_author(&missing, &mario()).status, 404);
        assert_eq!(api.update_author("not-a-uuid", &mario()).status, 400);
    }

    #[test]
    fn delete_maps_outcomes() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);
        let id = author_id(api.create_author(&mario()).location);

        let book = api.create_book(&BookRequest {
            isbn: "123".to_string(),
            title: "Sertao".to_string(),
            publication_date: None,
            genre: Genre::Fiction,
            price: None,
            author_id: Some(id.parse().unwrap()),
        });
        assert_eq!(book.status, 201);

        let blocked = api.delete_author(&id);
        assert_eq!(blocked.status, 400);

        let book_id = book.body.unwrap()["id"].as_str().unwrap().to_string();
        assert_eq!(api.delete_book(&book_id).status, 204);
        assert_eq!(api.delete_author(&id).status, 204);
        assert_eq!(api.delete_author(&id).status, 404);
        assert_eq!(api.delete_author("42").status, 400);
    }

    #[test]
    fn search_and_registration() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let registered = api.register_author(&AuthorRegistrationRequest {
            author: mario(),
            books: vec![BookRequest {
                isbn: "555".to_string(),
                title: "Memorias".to_string(),
                publication_date: None,
                genre: Genre::Biography,
                price: None,
                author_id: None,
            }],
        });
        assert_eq!(registered.status, 201);
        let body = registered.body.unwrap();
        assert_eq!(body["books"][0]["author_id"], body["author"]["id"]);

        let found = api.search_authors(Some("Mario"), None);
        assert_eq!(found.body.unwrap().as_array().unwrap().len(), 1);
        let none = api.search_authors(None, Some("Chilean"));
        assert_eq!(none.status, 200);
        assert_eq!(none.body.unwrap(), json!([]));
    }
}
