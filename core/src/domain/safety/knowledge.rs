#[cfg(test)]
use std::sync::LazyLock;

use crate::domain::{
    allergen::{composites::CompositeTable, lexicon::AllergenLexicon},
    common::entities::app_errors::CoreError,
    safety::conflicts::SubstitutionConflicts,
};

/// Read-only reference tables the evaluator consults.
#[derive(Debug, Clone)]
pub struct SafetyKnowledge {
    pub lexicon: AllergenLexicon,
    pub composites: CompositeTable,
    pub conflicts: SubstitutionConflicts,
}

impl SafetyKnowledge {
    pub fn new(
        lexicon: AllergenLexicon,
        composites: CompositeTable,
        conflicts: SubstitutionConflicts,
    ) -> Self {
        Self {
            lexicon,
            composites,
            conflicts,
        }
    }

    pub fn builtin() -> Result<Self, CoreError> {
        Ok(Self::new(
            AllergenLexicon::builtin()?,
            CompositeTable::builtin()?,
            SubstitutionConflicts::builtin()?,
        ))
    }
}

/// Built-in tables compiled once for the whole test run.
#[cfg(test)]
pub(crate) fn shared_knowledge() -> &'static SafetyKnowledge {
    static KNOWLEDGE: LazyLock<SafetyKnowledge> =
        LazyLock::new(|| SafetyKnowledge::builtin().expect("built-in tables compile"));
    &KNOWLEDGE
}
