pub mod errors;
pub mod db;
pub mod product;
pub mod validation;

#[cfg(test)]
mod tests;
