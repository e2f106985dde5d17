pub mod clauses;
pub mod conflicts;
pub mod consolidation;
pub mod detection;
pub mod entities;
pub mod feasibility;
pub mod garnish;
pub mod knowledge;
pub mod ports;
pub mod services;
pub mod substitutions;
pub mod value_objects;

pub use entities::*;
pub use knowledge::SafetyKnowledge;
pub use ports::*;
pub use services::SafetyEvaluator;
