use async_trait::async_trait;
use models::product::Product;
use models::validation::{NewProduct, ProductPatch};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Storage contract for products. Errors mean storage faults only; a missing
/// row is `None` or an affected count of 0.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    async fn update(&self, id: i32, patch: ProductPatch) -> Result<u64, ServiceError>;
    async fn delete(&self, id: i32) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        crate::db::product_service::create_product(&self.db, input).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        crate::db::product_service::list_products(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        crate::db::product_service::get_product(&self.db, id).await
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<u64, ServiceError> {
        crate::db::product_service::update_product(&self.db, id, &patch).await
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        crate::db::product_service::delete_product(&self.db, id).await
    }
}
