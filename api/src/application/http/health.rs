use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness check",
    responses(
        (status = 200, body = HealthResponse)
    ),
)]
pub async fn health_live() -> Response<HealthResponse> {
    Response::OK(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(health_live))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/health/live", root_path), get(health_live))
}
