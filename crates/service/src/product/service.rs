use std::sync::Arc;

use models::product::Product;
use models::validation::{validate_new_product, validate_product_patch};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Application service for products.
/// Validates payloads, checks existence with an explicit read before any
/// mutation and turns absence into `ServiceError::NotFound`.
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Product, ServiceError> {
        let input = validate_new_product(payload).map_err(|v| {
            warn!(violations = v.len(), "product_create_rejected");
            ServiceError::Validation(v)
        })?;
        let created = self.repo.create(input).await?;
        info!(id = created.id, name = %created.name, "product_created");
        Ok(created)
    }

    /// An empty store is a successful, empty result.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = self.repo.find_all().await?;
        info!(count = rows.len(), "products_listed");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Product, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))
    }

    /// Returns the row as re-read after the write.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: &Value) -> Result<Product, ServiceError> {
        self.get(id).await?;
        let patch = validate_product_patch(payload).map_err(|v| {
            warn!(id, violations = v.len(), "product_update_rejected");
            ServiceError::Validation(v)
        })?;
        let affected = self.repo.update(id, patch).await?;
        // deleted concurrently between the two reads
        let fresh = self.get(id).await?;
        info!(id, affected, "product_updated");
        Ok(fresh)
    }

    /// Returns the affected row count.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        self.get(id).await?;
        let affected = self.repo.delete(id).await?;
        info!(id, affected, "product_deleted");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::SeaOrmProductRepository;
    use crate::test_support::{get_db, FailingProductRepository, InMemoryProductRepository};
    use models::validation::Rule;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn in_memory() -> (Arc<InMemoryProductRepository>, ProductService<InMemoryProductRepository>) {
        let repo = Arc::new(InMemoryProductRepository::default());
        (Arc::clone(&repo), ProductService::new(repo))
    }

    #[tokio::test]
    async fn create_returns_input_with_unique_ids() -> anyhow::Result<()> {
        let (_, svc) = in_memory();
        let a = svc.create(&json!({"name": "Widget", "price": 12.50, "quantity": 5})).await?;
        let b = svc.create(&json!({"name": "Widget", "price": 12.50, "quantity": 5})).await?;
        assert_eq!(a.name, "Widget");
        assert_eq!(a.price, Decimal::new(1250, 2));
        assert_eq!(a.quantity, 5);
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn create_missing_name_is_rejected_without_writes() {
        let (repo, svc) = in_memory();
        let err = svc.create(&json!({"price": 10, "quantity": 1})).await.unwrap_err();
        match err {
            ServiceError::Validation(v) => assert!(v.has("name", Rule::Required)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.writes(), 0);
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_on_empty_store_is_ok() {
        let (_, svc) = in_memory();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_write_nothing() {
        let (repo, svc) = in_memory();
        assert!(matches!(svc.get(99).await, Err(ServiceError::NotFound(99))));
        assert!(matches!(svc.update(99, &json!({"price": 1})).await, Err(ServiceError::NotFound(99))));
        assert!(matches!(svc.delete(99).await, Err(ServiceError::NotFound(99))));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn not_found_wins_over_invalid_patch() {
        let (_, svc) = in_memory();
        let res = svc.update(5, &json!({"name": ""})).await;
        assert!(matches!(res, Err(ServiceError::NotFound(5))));
    }

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() -> anyhow::Result<()> {
        let (_, svc) = in_memory();
        let p = svc.create(&json!({"name": "Widget", "price": 12.50, "quantity": 5})).await?;
        let u = svc.update(p.id, &json!({"price": 9.99})).await?;
        assert_eq!(u.id, p.id);
        assert_eq!(u.price, Decimal::new(999, 2));
        assert_eq!(u.name, p.name);
        assert_eq!(u.quantity, p.quantity);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_patch_leaves_row_untouched() -> anyhow::Result<()> {
        let (repo, svc) = in_memory();
        let p = svc.create(&json!({"name": "Widget", "price": 1.5, "quantity": 5})).await?;
        let writes = repo.writes();
        let err = svc.update(p.id, &json!({"quantity": "many"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref v) if v.has("quantity", Rule::Number)));
        assert_eq!(repo.writes(), writes);
        assert_eq!(svc.get(p.id).await?, p);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_delete_again_is_not_found() -> anyhow::Result<()> {
        let (_, svc) = in_memory();
        let p = svc.create(&json!({"name": "Widget", "price": 1.5, "quantity": 5})).await?;
        assert_eq!(svc.delete(p.id).await?, 1);
        assert!(matches!(svc.delete(p.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get(p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn storage_faults_propagate() {
        let svc = ProductService::new(Arc::new(FailingProductRepository));
        assert!(matches!(svc.list().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.get(1).await, Err(ServiceError::Db(_))));
        let res = svc.create(&json!({"name": "Widget", "price": 1.5, "quantity": 5})).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn round_trip_through_sqlite() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = ProductService::new(Arc::new(SeaOrmProductRepository::new(db)));

        let created = svc.create(&json!({"name": "Widget", "price": 12.50, "quantity": 5})).await?;
        assert_eq!(svc.get(created.id).await?, created);

        let updated = svc.update(created.id, &json!({"name": "Sprocket"})).await?;
        assert_eq!(updated.name, "Sprocket");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.price, Decimal::new(1250, 2));

        assert_eq!(svc.list().await?.len(), 1);
        assert_eq!(svc.delete(created.id).await?, 1);
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}
