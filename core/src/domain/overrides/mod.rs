pub mod entities;
pub mod ports;
pub mod snapshot;
pub mod static_rules;

pub use entities::*;
pub use ports::*;
pub use snapshot::OverrideSnapshot;
pub use static_rules::StaticOverrideTable;
