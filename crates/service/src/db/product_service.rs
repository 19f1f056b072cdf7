use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use models::product::{self, Entity as ProductEntity};
use models::validation::{NewProduct, ProductPatch};
use crate::errors::ServiceError;

/// Insert a validated product; the id is assigned by storage.
pub async fn create_product(db: &DatabaseConnection, input: NewProduct) -> Result<product::Model, ServiceError> {
    let am = product::ActiveModel {
        name: Set(input.name),
        price: Set(input.price),
        quantity: Set(input.quantity),
        ..Default::default()
    };
    am.insert(db).await.map_err(ServiceError::db)
}

/// All products in insertion order.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let rows = ProductEntity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows)
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<Option<product::Model>, ServiceError> {
    let found = ProductEntity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found)
}

/// Write only the supplied columns; returns rows affected (0 for a missing id
/// or an empty patch).
pub async fn update_product(db: &DatabaseConnection, id: i32, patch: &ProductPatch) -> Result<u64, ServiceError> {
    if patch.is_empty() {
        return Ok(0);
    }
    let mut stmt = ProductEntity::update_many();
    if let Some(name) = &patch.name { stmt = stmt.col_expr(product::Column::Name, Expr::value(name.clone())); }
    if let Some(price) = patch.price { stmt = stmt.col_expr(product::Column::Price, Expr::value(price)); }
    if let Some(qty) = patch.quantity { stmt = stmt.col_expr(product::Column::Quantity, Expr::value(qty)); }
    let res = stmt
        .filter(product::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(res.rows_affected)
}

/// Delete by id; returns rows affected (0 or 1).
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let res = ProductEntity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    Ok(res.rows_affected)
}
