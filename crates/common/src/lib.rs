//! Pieces shared by the server crate and the binary: logging setup and the
//! JSON envelope every HTTP response is wrapped in.

pub mod types;
pub mod utils;
