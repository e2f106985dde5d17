pub mod allergen;
pub mod common;
pub mod dish;
pub mod overrides;
pub mod safety;
