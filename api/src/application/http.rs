pub mod dish_safety;
pub mod health;
pub mod server;
