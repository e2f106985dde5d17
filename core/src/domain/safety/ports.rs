use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    dish::entities::Dish,
    overrides::entities::OverrideStats,
    safety::{
        entities::EvaluationResult,
        value_objects::{EvaluateDishInput, EvaluateInlineDishInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait DishSafetyService: Send + Sync {
    /// Evaluates a catalog dish against the requested exclusions.
    fn evaluate_dish(
        &self,
        input: EvaluateDishInput,
    ) -> impl Future<Output = Result<EvaluationResult, CoreError>> + Send;

    /// Evaluates a dish supplied by the caller, e.g. a special not yet in the catalog.
    fn evaluate_inline_dish(
        &self,
        input: EvaluateInlineDishInput,
    ) -> impl Future<Output = Result<EvaluationResult, CoreError>> + Send;

    /// Catalog dishes in file order.
    fn list_dishes(&self) -> impl Future<Output = Result<Vec<Dish>, CoreError>> + Send;

    fn override_stats(&self) -> impl Future<Output = Result<OverrideStats, CoreError>> + Send;
}
