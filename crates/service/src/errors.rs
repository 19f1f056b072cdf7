use std::fmt::Display;

use models::validation::Violations;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(Violations),
    #[error("product {0} not found")]
    NotFound(i32),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn db(e: impl Display) -> Self { Self::Db(e.to_string()) }
}

impl From<Violations> for ServiceError {
    fn from(v: Violations) -> Self { Self::Validation(v) }
}
