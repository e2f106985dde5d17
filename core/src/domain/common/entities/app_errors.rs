use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid input")]
    Invalid,

    #[error("Malformed dish: {0}")]
    MalformedDish(String),

    #[error("Unknown allergen: {0}")]
    UnknownAllergen(String),

    #[error("Override source error: {0}")]
    OverrideSource(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("Internal server error")]
    InternalServerError,
}
