//! Common types shared across the workspace

pub mod response;

pub use response::{ApiResponse, ErrorResponse};
