use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::validation::Violations;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error response: `{"statusCode", "message", "detail"?, "errors"?}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: &'static str,
    pub detail: Option<String>,
    pub errors: Option<Violations>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a Violations>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str, detail: Option<String>) -> Self {
        Self { status, message, detail, errors: None }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Validation Error",
                detail: None,
                errors: Some(v),
            },
            ServiceError::NotFound(id) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("product {id} not found"))),
            ServiceError::Db(msg) => {
                // storage detail stays in the logs
                error!(error = %msg, "storage fault");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

// 请求体无法解析为 JSON 时，同样按校验错误返回 body 字段的违规
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation Error",
            detail: None,
            errors: Some(Violations::unreadable_body(rejection.body_text())),
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            message: self.message,
            detail: self.detail.as_deref(),
            errors: self.errors.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database bootstrap failed: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::validation::validate_new_product;

    #[test]
    fn validation_maps_to_bad_request_with_violations() {
        let v = validate_new_product(&serde_json::json!({"price": 1, "quantity": 1})).unwrap_err();
        let e = JsonApiError::from(ServiceError::Validation(v));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert!(e.errors.is_some());
    }

    #[test]
    fn not_found_carries_the_id() {
        let e = JsonApiError::from(ServiceError::NotFound(12));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.detail.as_deref(), Some("product 12 not found"));
    }

    #[test]
    fn storage_fault_hides_detail() {
        let e = JsonApiError::from(ServiceError::Db("password authentication failed".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.detail.is_none());
    }
}
