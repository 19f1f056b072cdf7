use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use common::types::ApiResponse;
use models::product::Product;
use serde_json::Value;

use crate::{errors::JsonApiError, routes::ServerState};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), JsonApiError>;

fn reply<T>(status: StatusCode, message: &str, data: T) -> ApiResult<T> {
    Ok((status, Json(ApiResponse::new(status.as_u16(), message, data))))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::CreateProductDoc,
    responses(
        (status = 201, description = "Product created", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, JsonApiError>,
) -> ApiResult<Product> {
    let created = state.products.create(&payload).await?;
    reply(StatusCode::CREATED, "Product created", created)
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products, possibly none", body = crate::openapi::ProductListResponseDoc),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Product>> {
    let all = state.products.list().await?;
    reply(StatusCode::OK, "All products", all)
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Bad Request: id is not an integer", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> ApiResult<Product> {
    let found = state.products.get(id).await?;
    reply(StatusCode::OK, "Product found", found)
}

#[utoipa::path(
    patch, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::UpdateProductDoc,
    responses(
        (status = 200, description = "Product updated", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<Value>, JsonApiError>,
) -> ApiResult<Product> {
    let updated = state.products.update(id, &payload).await?;
    reply(StatusCode::OK, "Product updated", updated)
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted; data is the affected row count", body = crate::openapi::DeleteResponseDoc),
        (status = 400, description = "Bad Request: id is not an integer", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> ApiResult<u64> {
    let affected = state.products.delete(id).await?;
    reply(StatusCode::OK, "Product deleted", affected)
}
