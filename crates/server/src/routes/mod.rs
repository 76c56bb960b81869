//! API route handlers
//!
//! - `analyze`: `POST /`, the keyword detection endpoint
//! - `health`: liveness and Prometheus metrics

pub mod analyze;
pub mod health;

use crate::error::ServerError;

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
