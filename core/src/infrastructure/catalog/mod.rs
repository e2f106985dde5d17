pub mod mappers;
pub mod records;
pub mod repositories;
