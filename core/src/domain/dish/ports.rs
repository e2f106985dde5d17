use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, dish::entities::Dish};

/// Read access to the menu catalog.
#[cfg_attr(test, mockall::automock)]
pub trait DishCatalog: Send + Sync {
    fn get_dish(
        &self,
        dish_id: String,
    ) -> impl Future<Output = Result<Option<Dish>, CoreError>> + Send;

    fn list_dishes(&self) -> impl Future<Output = Result<Vec<Dish>, CoreError>> + Send;
}
