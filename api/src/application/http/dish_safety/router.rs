use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    evaluate_dish::{__path_evaluate_dish, evaluate_dish},
    evaluate_inline_dish::{__path_evaluate_inline_dish, evaluate_inline_dish},
    get_override_stats::{__path_get_override_stats, get_override_stats},
    list_dishes::{__path_list_dishes, list_dishes},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_dishes, evaluate_dish, evaluate_inline_dish))]
pub struct DishSafetyApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_override_stats))]
pub struct OverridesApiDoc;

pub fn dish_safety_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/dishes", state.args.server.root_path),
            get(list_dishes),
        )
        .route(
            &format!("{}/dishes/safety", state.args.server.root_path),
            post(evaluate_inline_dish),
        )
        .route(
            &format!("{}/dishes/{{dish_id}}/safety", state.args.server.root_path),
            post(evaluate_dish),
        )
        .route(
            &format!("{}/overrides/stats", state.args.server.root_path),
            get(get_override_stats),
        )
}
