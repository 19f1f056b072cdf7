#![cfg(test)]
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use configs::DatabaseConfig;
use models::db::{connect_with_config, ensure_schema};
use models::product::Product;
use models::validation::{NewProduct, ProductPatch};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::product::ProductRepository;

/// Fresh in-memory SQLite database with the schema in place.
/// Pool is pinned to one connection: each `sqlite::memory:` connection is a
/// separate database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

#[derive(Default)]
struct Rows {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
    writes: usize,
}

/// Map-backed repository that counts calls to its mutating methods.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: Mutex<Rows>,
}

impl InMemoryProductRepository {
    pub fn writes(&self) -> usize { self.inner.lock().unwrap().writes }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let mut g = self.inner.lock().unwrap();
        g.writes += 1;
        g.last_id += 1;
        let p = Product { id: g.last_id, name: input.name, price: input.price, quantity: input.quantity };
        g.rows.insert(p.id, p.clone());
        Ok(p)
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.inner.lock().unwrap().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<u64, ServiceError> {
        let mut g = self.inner.lock().unwrap();
        g.writes += 1;
        let Some(row) = g.rows.get_mut(&id) else { return Ok(0) };
        if patch.is_empty() { return Ok(0); }
        if let Some(name) = patch.name { row.name = name; }
        if let Some(price) = patch.price { row.price = price; }
        if let Some(qty) = patch.quantity { row.quantity = qty; }
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        let mut g = self.inner.lock().unwrap();
        g.writes += 1;
        Ok(g.rows.remove(&id).map_or(0, |_| 1))
    }
}

/// Repository whose every call is a storage fault.
pub struct FailingProductRepository;

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn create(&self, _input: NewProduct) -> Result<Product, ServiceError> {
        Err(ServiceError::db("connection refused"))
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::db("connection refused"))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::db("connection refused"))
    }

    async fn update(&self, _id: i32, _patch: ProductPatch) -> Result<u64, ServiceError> {
        Err(ServiceError::db("connection refused"))
    }

    async fn delete(&self, _id: i32) -> Result<u64, ServiceError> {
        Err(ServiceError::db("connection refused"))
    }
}
