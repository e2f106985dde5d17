pub mod json_dish_catalog;
