//! Service layer providing the product operations on top of models.
//! - Separates business logic from data access through `ProductRepository`.
//! - Reuses validation and entity definitions in `models` crate.
//! - Absence is a value (`Option`, affected counts) below the service and a
//!   `ServiceError::NotFound` above it.

pub mod errors;
pub mod db;
pub mod product;
#[cfg(test)]
pub mod test_support;
