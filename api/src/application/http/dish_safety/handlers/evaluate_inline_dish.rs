use allergen_guard_core::domain::safety::{
    ports::DishSafetyService, value_objects::EvaluateInlineDishInput,
};
use axum::extract::State;

use crate::application::http::{
    dish_safety::{
        handlers::evaluate_dish::EvaluateDishResponse,
        validators::{EvaluateInlineDishValidator, parse_allergens},
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/safety",
    tag = "dish_safety",
    summary = "Evaluate inline dish",
    description = "Evaluates a dish sent in the request body, e.g. a daily special that is not in the catalog yet.",
    request_body = EvaluateInlineDishValidator,
    responses(
        (status = 200, body = EvaluateDishResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn evaluate_inline_dish(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<EvaluateInlineDishValidator>,
) -> Result<Response<EvaluateDishResponse>, ApiError> {
    let allergens = parse_allergens(&payload.allergens)?;

    let evaluation = state
        .service
        .evaluate_inline_dish(EvaluateInlineDishInput {
            dish: payload.dish,
            allergens,
            custom_exclusions: payload.custom_exclusions,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(EvaluateDishResponse::from(evaluation)))
}
