use allergen_guard_core::domain::common::entities::app_errors::CoreError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Dish not found".to_string()),
            CoreError::Invalid => ApiError::BadRequest("Invalid input".to_string()),
            CoreError::MalformedDish(_) | CoreError::UnknownAllergen(_) => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::OverrideSource(_)
            | CoreError::Catalog(_)
            | CoreError::Evaluation(_)
            | CoreError::InternalServerError => {
                error!("Request failed: {}", error);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let body = ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// `Json` extractor that also runs the payload's `validator` rules.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
