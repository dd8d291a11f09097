//! Route handlers grouped by URL prefix

pub mod auth;
pub mod passwordless;

use actix_web::HttpResponse;
use serde_json::json;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
