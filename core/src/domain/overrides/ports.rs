use std::future::Future;

use crate::domain::{
    allergen::entities::Allergen,
    common::entities::app_errors::CoreError,
    overrides::entities::{OverrideLookup, OverrideRow, OverrideStats},
};

/// Synchronous lookup used by the evaluator on every request.
#[cfg_attr(test, mockall::automock)]
pub trait OverrideStore: Send + Sync {
    fn lookup(&self, dish_id: &str, allergen: Allergen) -> OverrideLookup;

    /// Live stores are authoritative: a missing record there means
    /// nobody has verified the dish, not that it is fine.
    fn is_live(&self) -> bool;

    fn stats(&self) -> OverrideStats;
}

/// Bulk loader the override snapshot is built from.
#[cfg_attr(test, mockall::automock)]
pub trait OverrideSource: Send + Sync {
    fn load_records(&self) -> impl Future<Output = Result<Vec<OverrideRow>, CoreError>> + Send;
}
