//! Product repository contract and SQLite implementation.

use super::RepoResult;
use crate::db::ensure_schema_ready;
use crate::model::product::{Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT id, name, description, price FROM products";

/// Persistence delegate for products.
pub trait ProductRepository {
    /// Inserts or replaces the row keyed by `product.id`.
    fn save(&self, product: &Product) -> RepoResult<Product>;
    fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Product>>;
    /// Returns whether a row was removed. Missing ids are not an error.
    fn delete_by_id(&self, id: &str) -> RepoResult<bool>;
}

#[derive(Clone, Copy)]
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn save(&self, product: &Product) -> RepoResult<Product> {
        self.conn.execute(
            "INSERT INTO products (id, name, description, price)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price = excluded.price;",
            params![product.id, product.name, product.description, product.price],
        )?;
        Ok(product.clone())
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Ok(self
            .conn
            .query_row(
                &format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_product_row,
            )
            .optional()?)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"))?;
        let products = stmt
            .query_map([name], parse_product_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get::<_, ProductId>("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
    })
}
