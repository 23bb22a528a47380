use super::{location, parse_id, respond, wired, CatalogApi};
use crate::dto::{TodoDto, TodoRequest, TodoStatusRequest};
use crate::response::ApiResponse;
use catalog_core::{Notifier, Todo, TodoId};

impl<N: Notifier> CatalogApi<'_, N> {
    /// `201` with the stored todo, `409` when the description is taken.
    pub fn create_todo(&self, request: &TodoRequest) -> ApiResponse {
        let result = wired(self.catalog.todos(&self.notifier))
            .and_then(|service| service.create(&Todo::new(request.description.clone())));
        respond("todo_create", result, |todo| {
            ApiResponse::created_with_body(location("todos", todo.id), &TodoDto::from(todo))
        })
    }

    /// `200` with the updated todo, `404` for an unknown id.
    pub fn update_todo_status(&self, id: &str, request: TodoStatusRequest) -> ApiResponse {
        let id: TodoId = match parse_id("todo", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result = wired(self.catalog.todos(&self.notifier))
            .and_then(|service| service.update_status(id, request.completed));
        respond("todo_update_status", result, |todo| {
            ApiResponse::ok(&TodoDto::from(todo))
        })
    }

    pub fn get_todo(&self, id: &str) -> ApiResponse {
        let id: TodoId = match parse_id("todo", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let result =
            wired(self.catalog.todos(&self.notifier)).and_then(|service| service.find_by_id(id));
        respond("todo_get", result, |found| match found {
            Some(todo) => ApiResponse::ok(&TodoDto::from(todo)),
            None => ApiResponse::not_found(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::{TodoRequest, TodoStatusRequest};
    use crate::CatalogApi;
    use catalog_core::db::open_db_in_memory;
    use serde_json::json;

    fn request(description: &str) -> TodoRequest {
        TodoRequest {
            description: description.to_string(),
        }
    }

    #[test]
    fn create_then_conflict() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let created = api.create_todo(&request("Buy milk"));
        assert_eq!(created.status, 201);
        let body = created.body.unwrap();
        assert_eq!(body["description"], json!("Buy milk"));
        assert_eq!(created.location, Some(format!("/todos/{}", body["id"])));

        let conflict = api.create_todo(&request("Buy milk"));
        assert_eq!(conflict.status, 409);
        assert_eq!(conflict.body.unwrap()["errors"], json!([]));
    }

    #[test]
    fn status_update_and_lookup() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);
        api.create_todo(&request("Buy milk"));

        let updated = api.update_todo_status("1", TodoStatusRequest { completed: true });
        assert_eq!(updated.status, 200);
        assert_eq!(updated.body.unwrap()["completed"], json!(true));

        assert_eq!(api.get_todo("1").status, 200);
        assert_eq!(api.get_todo("2").status, 404);
        assert_eq!(
            api.update_todo_status("2", TodoStatusRequest { completed: true })
                .status,
            404
        );
        assert_eq!(api.get_todo("one").status, 400);
    }

    #[test]
    fn blank_description_is_unprocessable() {
        let conn = open_db_in_memory().unwrap();
        let api = CatalogApi::new(&conn);

        let response = api.create_todo(&request(" "));
        assert_eq!(response.status, 422);
        assert_eq!(
            response.body.unwrap()["errors"][0]["field"],
            json!("description")
        );
    }
}
