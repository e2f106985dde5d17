use allergen_guard_core::domain::{dish::entities::Dish, safety::ports::DishSafetyService};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListDishesResponse {
    pub data: Vec<Dish>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "dish_safety",
    summary = "List catalog dishes",
    responses(
        (status = 200, body = ListDishesResponse)
    ),
)]
pub async fn list_dishes(
    State(state): State<AppState>,
) -> Result<Response<ListDishesResponse>, ApiError> {
    let dishes = state.service.list_dishes().await.map_err(ApiError::from)?;

    Ok(Response::OK(ListDishesResponse { data: dishes }))
}
