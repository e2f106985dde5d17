use utoipa::OpenApi;

use crate::application::http::{
    dish_safety::router::{DishSafetyApiDoc, OverridesApiDoc},
    health::HealthApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Allergen Guard API"
    ),
    nest(
        (path = "/dishes", api = DishSafetyApiDoc),
        (path = "/overrides", api = OverridesApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
