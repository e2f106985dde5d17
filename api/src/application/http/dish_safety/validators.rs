use allergen_guard_core::domain::{allergen::entities::Allergen, dish::entities::Dish};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluateDishValidator {
    /// Allergen ids or common names, e.g. `dairy`, `tree nuts`, `eggs`.
    #[serde(default)]
    #[validate(length(max = 32, message = "too many allergens"))]
    pub allergens: Vec<String>,

    /// Free-text items the guest wants left out, e.g. `cilantro`.
    #[serde(default)]
    #[validate(length(max = 20, message = "too many custom exclusions"))]
    pub custom_exclusions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluateInlineDishValidator {
    pub dish: Dish,

    #[serde(default)]
    #[validate(length(max = 32, message = "too many allergens"))]
    pub allergens: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "too many custom exclusions"))]
    pub custom_exclusions: Vec<String>,
}

pub fn parse_allergens(raw: &[String]) -> Result<Vec<Allergen>, ApiError> {
    raw.iter()
        .map(|a| a.parse::<Allergen>().map_err(ApiError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allergens_accepts_aliases() {
        let allergens =
            parse_allergens(&["Tree Nuts".to_string(), "milk".to_string()]).unwrap();

        assert_eq!(allergens, vec![Allergen::TreeNut, Allergen::Dairy]);
    }

    #[test]
    fn test_parse_allergens_rejects_unknown() {
        assert!(matches!(
            parse_allergens(&["kiwi".to_string()]),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_too_many_exclusions_fail_validation() {
        let payload = EvaluateDishValidator {
            allergens: Vec::new(),
            custom_exclusions: vec!["x".to_string(); 21],
        };

        assert!(payload.validate().is_err());
    }
}
