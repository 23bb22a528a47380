use super::{location, respond, wired, CatalogApi};
use crate::response::ApiResponse;
use catalog_core::{Notifier, ProductInput};

impl<N: Notifier> CatalogApi<'_, N> {
    pub fn create_product(&self, input: ProductInput) -> ApiResponse {
        let result = wired(self.catalog.products()).and_then(|service| service.create(input));
        respond("product_create", result, |product| {
            ApiResponse::created_with_body(location("products", Some(&product.id)), &product)
        })
    }

    pub fn get_product(&self, id: &str) -> ApiResponse {
        let result = wired(self.catalog.products()).and_then(|service| service.find_by_id(id));
        respond("product_get", result, |found| match found {
            Some(product) => ApiResponse::ok(&product),
            None => ApiResponse::not_found(),
        })
    }

    /// Stores `input` under `id` whether or not it existed; always `204`
    /// unless the input is invalid.
    pub fn replace_product(&self, id: &str, input: ProductInput) -> ApiResponse {
        let result = wired(self.catalog.products()).and_then(|service| service.replace(id, input));
        respond("product_replace", result, |_| ApiResponse::no_content())
    }

    /// Unconditional: `204` even when nothing was stored under `id`.
    pub fn delete_product(&self, id: &str) -> ApiResponse {
        let result = wired(self.catalog.products()).and_then(|service| service.delete(id));
        respond("product_delete", result, |()| ApiResponse::no_content())
    }

    pub fn search_products(&self, name: &str) -> ApiResponse {
        let result =
            wired(self.catalog.products()).and_then(|service| service.search_by_name(name));
        respond("product_search", result, |products| ApiResponse::ok(&products))
    }
}
