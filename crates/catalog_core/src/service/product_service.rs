//! Product use-case service.
//!
//! Products have no cross-record invariants: identity is a fresh UUID
//! string chosen here, replace is an upsert and delete is unconditional.

use crate::error::ServiceResult;
use crate::model::product::{Product, ProductInput};
use crate::repo::product_repo::ProductRepository;
use log::info;
use uuid::Uuid;

pub struct ProductService<P: ProductRepository> {
    repo: P,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    pub fn create(&self, input: ProductInput) -> ServiceResult<Product> {
        input.validate()?;
        let product = self.repo.save(&input.into_product(Uuid::new_v4().to_string()))?;
        info!("event=product_create module=product status=ok id={}", product.id);
        Ok(product)
    }

    pub fn find_by_id(&self, id: &str) -> ServiceResult<Option<Product>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Stores `input` under `id`, creating the product when absent.
    pub fn replace(&self, id: &str, input: ProductInput) -> ServiceResult<Product> {
        input.validate()?;
        Ok(self.repo.save(&input.into_product(id.to_string()))?)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let removed = self.repo.delete_by_id(id)?;
        info!("event=product_delete module=product status=ok id={id} removed={removed}");
        Ok(())
    }

    pub fn search_by_name(&self, name: &str) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.find_by_name(name)?)
    }
}
