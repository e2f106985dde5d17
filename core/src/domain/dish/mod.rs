pub mod classification;
pub mod entities;
pub mod ports;

pub use entities::*;
pub use ports::*;
