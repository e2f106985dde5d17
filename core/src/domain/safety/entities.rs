use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::domain::{
    allergen::entities::{Allergen, AllergenFlag},
    overrides::entities::OverrideMode,
};

pub const MESSAGE_UNVERIFIED: &str = "Cannot confirm safety. Verify with staff before serving.";
pub const MESSAGE_NOT_MODIFIABLE: &str =
    "Cannot be changed after preparation. This dish contains allergens and cannot be modified.";
pub const MESSAGE_MODIFIABLE: &str = "This dish contains allergens. See substitutions below.";
pub const MESSAGE_NO_CHANGES: &str = "No Changes";

/// What the guest asked to avoid: a catalog allergen or a free-text term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    Allergen(Allergen),
    Custom(String),
}

impl Exclusion {
    pub fn label(&self) -> String {
        match self {
            Exclusion::Allergen(allergen) => allergen.label().to_string(),
            Exclusion::Custom(term) => term.clone(),
        }
    }

    pub fn allergen(&self) -> Option<Allergen> {
        match self {
            Exclusion::Allergen(allergen) => Some(*allergen),
            Exclusion::Custom(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyStatus {
    Safe,
    Unsafe,
    Unverified,
}

/// Where a per-exclusion verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    Override,
    Unverified,
    Automatic,
}

/// One line of a kitchen ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Remove {
        item: String,
        contains: Vec<String>,
        replacement: Option<String>,
    },
    Substitute {
        item: String,
        replacement: String,
    },
    NotPossible {
        reason: String,
    },
    Verify {
        reason: String,
    },
    Verbatim(String),
}

impl Instruction {
    pub fn remove(item: impl Into<String>) -> Self {
        Instruction::Remove {
            item: item.into(),
            contains: Vec::new(),
            replacement: None,
        }
    }

    pub fn not_possible(reason: impl Into<String>) -> Self {
        Instruction::NotPossible {
            reason: reason.into(),
        }
    }

    pub fn replacement(&self) -> Option<&str> {
        match self {
            Instruction::Remove { replacement, .. } => replacement.as_deref(),
            Instruction::Substitute { replacement, .. } => Some(replacement),
            _ => None,
        }
    }

    /// Same instruction without its replacement; a substitution falls back
    /// to a plain removal.
    pub fn without_replacement(self) -> Self {
        match self {
            Instruction::Remove { item, contains, .. } => Instruction::Remove {
                item,
                contains,
                replacement: None,
            },
            Instruction::Substitute { item, .. } => Instruction::remove(item),
            other => other,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Remove {
                item,
                contains,
                replacement,
            } => {
                write!(f, "NO {}", item)?;
                if !contains.is_empty() {
                    write!(f, " (contains: {})", contains.join(", "))?;
                }
                if let Some(replacement) = replacement {
                    write!(f, " (use {})", replacement)?;
                }
                Ok(())
            }
            Instruction::Substitute { replacement, .. } => write!(f, "SUB {}", replacement),
            Instruction::NotPossible { reason } => write!(f, "NOT POSSIBLE - {}", reason),
            Instruction::Verify { reason } => write!(f, "VERIFY WITH STAFF - {}", reason),
            Instruction::Verbatim(text) => f.write_str(text),
        }
    }
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Instruction::Verbatim)
    }
}

/// A substitute dropped because it would bring back another excluded item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RejectedSubstitution {
    pub item: String,
    pub replacement: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExclusionResult {
    pub exclusion: Exclusion,
    /// Catalog flag, absent for text-only allergens and custom terms.
    pub flag: Option<AllergenFlag>,
    pub found_ingredients: Vec<String>,
    pub status: SafetyStatus,
    pub can_be_modified: bool,
    #[schema(value_type = Vec<String>)]
    pub instructions: Vec<Instruction>,
    pub basis: VerdictBasis,
    #[serde(default)]
    pub rejected_substitutions: Vec<RejectedSubstitution>,
}

impl ExclusionResult {
    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }

    pub fn instruction_lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }
}

/// A replacement dropped while merging the per-exclusion instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RejectedOption {
    pub option: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsolidatedRemovals {
    pub sauce: Vec<String>,
    pub garnish: Vec<String>,
    pub seasoning: Vec<String>,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsolidatedSubstitutions {
    pub protein: Vec<String>,
    pub other: Vec<String>,
}

/// Every exclusion's instructions merged into one list for the kitchen:
/// duplicates folded, grouped by component, at most one bread option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsolidatedModifications {
    pub bread: Option<String>,
    pub removals: ConsolidatedRemovals,
    pub substitutions: ConsolidatedSubstitutions,
    pub preparation: Vec<String>,
    pub notes: Vec<String>,
    pub rejected: Vec<RejectedOption>,
}

impl ConsolidatedModifications {
    pub fn had_conflicts(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// Bread first, then removals, substitutions and preparation steps.
    pub fn lines(&self) -> Vec<String> {
        self.bread
            .iter()
            .chain(&self.removals.sauce)
            .chain(&self.removals.garnish)
            .chain(&self.removals.seasoning)
            .chain(&self.removals.other)
            .chain(&self.substitutions.protein)
            .chain(&self.substitutions.other)
            .chain(&self.preparation)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResult {
    pub dish_id: String,
    pub dish_name: String,
    pub overall_status: SafetyStatus,
    pub message: String,
    pub results: Vec<ExclusionResult>,
    #[serde(default)]
    pub consolidated: ConsolidatedModifications,
    pub override_mode: OverrideMode,
    pub needs_review: bool,
}

impl EvaluationResult {
    pub fn new(
        dish_id: String,
        dish_name: String,
        results: Vec<ExclusionResult>,
        override_mode: OverrideMode,
        needs_review: bool,
    ) -> Self {
        let overall_status = overall_status(&results);
        let message = summary_message(&results).to_string();

        Self {
            dish_id,
            dish_name,
            overall_status,
            message,
            results,
            consolidated: ConsolidatedModifications::default(),
            override_mode,
            needs_review,
        }
    }

    pub fn with_consolidated(mut self, consolidated: ConsolidatedModifications) -> Self {
        self.consolidated = consolidated;
        self
    }

    pub fn is_safe(&self) -> bool {
        self.overall_status == SafetyStatus::Safe
    }

    pub fn result_for(&self, exclusion: &Exclusion) -> Option<&ExclusionResult> {
        self.results.iter().find(|r| &r.exclusion == exclusion)
    }

    /// Kitchen ticket: a header with the dish name, then every exclusion
    /// that needs attention followed by its instructions.
    pub fn ticket_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("=== {} ===", self.dish_name.to_uppercase())];

        for result in self.results.iter().filter(|r| !r.is_safe()) {
            lines.push(format!("{}:", result.exclusion.label().to_uppercase()));
            lines.extend(result.instructions.iter().map(|i| format!("  {}", i)));
        }

        if lines.len() == 1 {
            lines.push(MESSAGE_NO_CHANGES.to_string());
        }
        lines
    }
}

fn overall_status(results: &[ExclusionResult]) -> SafetyStatus {
    if results.iter().any(|r| r.status == SafetyStatus::Unsafe) {
        SafetyStatus::Unsafe
    } else if results.iter().any(|r| r.status == SafetyStatus::Unverified) {
        SafetyStatus::Unverified
    } else {
        SafetyStatus::Safe
    }
}

fn summary_message(results: &[ExclusionResult]) -> &'static str {
    let flagged: Vec<&ExclusionResult> = results.iter().filter(|r| !r.is_safe()).collect();

    if flagged.iter().any(|r| r.basis == VerdictBasis::Unverified) {
        MESSAGE_UNVERIFIED
    } else if flagged.iter().any(|r| !r.can_be_modified) {
        MESSAGE_NOT_MODIFIABLE
    } else if !flagged.is_empty() {
        MESSAGE_MODIFIABLE
    } else {
        MESSAGE_NO_CHANGES
    }
}
