use axum::Json;
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::{common::error::AppError, docs::ApiDoc};

// GET /health (liveness: não consulta o banco)
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Processo vivo"))
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": "true" }))
}

// GET /api-docs/openapi.json
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}
