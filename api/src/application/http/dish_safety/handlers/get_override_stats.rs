use allergen_guard_core::domain::{
    overrides::entities::OverrideStats, safety::ports::DishSafetyService,
};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetOverrideStatsResponse {
    pub data: OverrideStats,
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "overrides",
    summary = "Override table status",
    description = "Reports whether the live override table is loaded and how many records it holds per allergen.",
    responses(
        (status = 200, body = GetOverrideStatsResponse)
    ),
)]
pub async fn get_override_stats(
    State(state): State<AppState>,
) -> Result<Response<GetOverrideStatsResponse>, ApiError> {
    let stats = state
        .service
        .override_stats()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetOverrideStatsResponse { data: stats }))
}
