use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    /// Decimal with two fractional digits, serialized as a string
    #[schema(example = "12.50")]
    pub price: String,
    pub quantity: i32,
}

#[derive(ToSchema)]
pub struct CreateProductDoc {
    pub name: String,
    #[schema(example = 12.5)]
    pub price: f64,
    pub quantity: i32,
}

#[derive(ToSchema)]
pub struct UpdateProductDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDoc {
    pub status_code: u16,
    pub data: ProductDoc,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponseDoc {
    pub status_code: u16,
    pub data: Vec<ProductDoc>,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponseDoc {
    pub status_code: u16,
    /// Rows affected
    pub data: u64,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ViolationDoc {
    pub field: String,
    /// One of `required`, `not_empty`, `string`, `number`, `integer`, `object`, `range`
    pub rule: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDoc {
    pub status_code: u16,
    pub message: String,
    pub detail: Option<String>,
    pub errors: Option<Vec<ViolationDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::create,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            CreateProductDoc,
            UpdateProductDoc,
            ProductResponseDoc,
            ProductListResponseDoc,
            DeleteResponseDoc,
            ViolationDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
