pub mod composites;
pub mod entities;
pub mod lexicon;
pub mod matching;

pub use composites::CompositeTable;
pub use entities::*;
pub use lexicon::AllergenLexicon;
