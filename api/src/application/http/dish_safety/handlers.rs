pub mod evaluate_dish;
pub mod evaluate_inline_dish;
pub mod get_override_stats;
pub mod list_dishes;
