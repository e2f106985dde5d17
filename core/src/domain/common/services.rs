use std::sync::Arc;

use crate::domain::{
    dish::ports::DishCatalog, overrides::ports::OverrideStore, safety::services::SafetyEvaluator,
};

/// Application service wiring the catalog to the evaluator. Use-case traits
/// are implemented on it in each domain's `services.rs`.
pub struct Service<D, O>
where
    D: DishCatalog,
    O: OverrideStore,
{
    pub(crate) dish_catalog: Arc<D>,
    pub(crate) evaluator: Arc<SafetyEvaluator<O>>,
}

impl<D, O> Service<D, O>
where
    D: DishCatalog,
    O: OverrideStore,
{
    pub fn new(dish_catalog: D, evaluator: SafetyEvaluator<O>) -> Self {
        Self {
            dish_catalog: Arc::new(dish_catalog),
            evaluator: Arc::new(evaluator),
        }
    }

    pub fn evaluator(&self) -> &SafetyEvaluator<O> {
        &self.evaluator
    }
}

impl<D, O> Clone for Service<D, O>
where
    D: DishCatalog,
    O: OverrideStore,
{
    fn clone(&self) -> Self {
        Self {
            dish_catalog: Arc::clone(&self.dish_catalog),
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}
