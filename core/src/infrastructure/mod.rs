pub mod catalog;
pub mod overrides;
