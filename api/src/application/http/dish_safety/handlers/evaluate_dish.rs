use allergen_guard_core::domain::safety::{
    entities::EvaluationResult, ports::DishSafetyService, value_objects::EvaluateDishInput,
};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    dish_safety::validators::{EvaluateDishValidator, parse_allergens},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EvaluateDishResponse {
    pub data: EvaluationResult,
    /// Kitchen ticket rendering of the result.
    pub ticket: Vec<String>,
}

impl From<EvaluationResult> for EvaluateDishResponse {
    fn from(data: EvaluationResult) -> Self {
        let ticket = data.ticket_lines();
        Self { data, ticket }
    }
}

#[utoipa::path(
    post,
    path = "/{dish_id}/safety",
    tag = "dish_safety",
    summary = "Evaluate catalog dish",
    description = "Checks a catalog dish against the guest's allergens and custom exclusions and returns kitchen instructions.",
    params(
        ("dish_id" = String, Path, description = "Catalog dish id"),
    ),
    request_body = EvaluateDishValidator,
    responses(
        (status = 200, body = EvaluateDishResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    ),
)]
pub async fn evaluate_dish(
    Path(dish_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<EvaluateDishValidator>,
) -> Result<Response<EvaluateDishResponse>, ApiError> {
    let allergens = parse_allergens(&payload.allergens)?;

    let evaluation = state
        .service
        .evaluate_dish(EvaluateDishInput {
            dish_id,
            allergens,
            custom_exclusions: payload.custom_exclusions,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(EvaluateDishResponse::from(evaluation)))
}
