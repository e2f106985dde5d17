use tracing::debug;

use crate::domain::{
    allergen::{
        entities::Allergen,
        matching::{PhraseMatcher, custom_term_variants, has_phrase},
    },
    common::entities::app_errors::CoreError,
    safety::{
        entities::{Exclusion, ExclusionResult, Instruction, RejectedSubstitution},
        knowledge::SafetyKnowledge,
    },
};

use Allergen::*;

// Supplier ingredient sheets for the items the kitchen substitutes in.
const BUILTIN_CONFLICTS: &[(&str, &[Allergen], &str)] = &[
    (
        "multi-grain",
        &[Gluten, Sesame],
        "Multi-grain bread contains wheat (gluten) and sesame seeds",
    ),
    ("multigrain", &[Gluten, Sesame], "Multi-grain bread contains wheat (gluten) and sesame seeds"),
    (
        "buttery onion bun",
        &[Gluten, Dairy, Sesame, OnionGarlic],
        "Buttery onion bun contains wheat (gluten), butter flavor (dairy), onion and sesame",
    ),
    (
        "onion bun",
        &[Gluten, Dairy, Sesame, OnionGarlic],
        "Onion bun contains wheat (gluten), butter flavor (dairy), onion and sesame",
    ),
    (
        "onion bread",
        &[Gluten, Egg, OnionGarlic],
        "Onion bread contains wheat (gluten), eggs and onion",
    ),
    (
        "sesame seed bun",
        &[Gluten, Egg, Sesame],
        "Sesame seed bun contains wheat (gluten), whole egg topping, and sesame seeds",
    ),
    (
        "sesame bun",
        &[Gluten, Egg, Sesame],
        "Sesame bun contains wheat (gluten), egg, and sesame seeds",
    ),
    (
        "kids bun",
        &[Gluten, Egg, Dairy],
        "Kids bun (brioche) contains wheat (gluten), eggs, and dairy (milk powder, butter)",
    ),
    (
        "brioche",
        &[Gluten, Egg, Dairy],
        "Brioche contains wheat (gluten), eggs, and dairy (milk powder, butter)",
    ),
    (
        "gluten free bun",
        &[Dairy, Egg],
        "Gluten-free bun contains melted butter (dairy) and whole eggs",
    ),
    (
        "gluten-free bun",
        &[Dairy, Egg],
        "Gluten-free bun contains melted butter (dairy) and whole eggs",
    ),
    (
        "gluten-free bread",
        &[Dairy, Egg],
        "Gluten-free bread contains melted butter (dairy) and whole eggs",
    ),
    ("wheat bread", &[Gluten], "Wheat bread contains gluten"),
    ("sourdough", &[Gluten], "Sourdough contains gluten"),
    ("ciabatta", &[Gluten], "Ciabatta contains gluten"),
    ("focaccia", &[Gluten], "Focaccia contains gluten"),
    ("ranch", &[Dairy, Egg], "Ranch contains buttermilk (dairy) and mayonnaise (eggs)"),
    ("blue cheese", &[Dairy], "Blue cheese is a dairy product"),
    (
        "caesar",
        &[Dairy, Egg, Shellfish, Fish],
        "Caesar contains parmesan (dairy), egg, and anchovy",
    ),
    ("mayo", &[Egg, Soy], "Mayonnaise contains eggs and often soy oil"),
    ("mayonnaise", &[Egg, Soy], "Mayonnaise contains eggs and often soy oil"),
    ("aioli", &[Egg, OnionGarlic], "Aioli contains eggs and garlic"),
    ("tartar", &[Egg, Soy], "Tartar sauce contains mayonnaise (eggs, soy)"),
    ("cream sauce", &[Dairy], "Cream sauce contains dairy"),
    ("alfredo", &[Dairy, Gluten], "Alfredo contains cream (dairy) and often flour (gluten)"),
    ("hollandaise", &[Dairy, Egg], "Hollandaise contains butter (dairy) and eggs"),
    ("béarnaise", &[Dairy, Egg], "Béarnaise contains butter (dairy) and eggs"),
    ("bearnaise", &[Dairy, Egg], "Béarnaise contains butter (dairy) and eggs"),
    ("pesto", &[Dairy, TreeNut], "Pesto contains parmesan (dairy) and pine nuts (tree nuts)"),
    ("teriyaki", &[Soy, Gluten], "Teriyaki contains soy sauce (soy, gluten)"),
    ("soy sauce", &[Soy, Gluten], "Soy sauce contains soy and wheat (gluten)"),
    (
        "worcestershire",
        &[Shellfish, Fish, Gluten, Soy],
        "Worcestershire contains anchovies, may contain gluten and soy",
    ),
    ("cheese", &[Dairy], "Cheese is a dairy product"),
    ("parmesan", &[Dairy], "Parmesan is a dairy product"),
    ("cheddar", &[Dairy], "Cheddar is a dairy product"),
    ("swiss", &[Dairy], "Swiss cheese is a dairy product"),
    ("mozzarella", &[Dairy], "Mozzarella is a dairy product"),
    ("gruyere", &[Dairy], "Gruyere is a dairy product"),
    ("butter", &[Dairy], "Butter is a dairy product"),
    ("sour cream", &[Dairy], "Sour cream is a dairy product"),
    ("croutons", &[Gluten, Dairy], "Croutons contain bread (gluten) and often butter (dairy)"),
    ("breadcrumb", &[Gluten], "Breadcrumbs contain gluten"),
    ("breading", &[Gluten, Egg], "Breading contains flour (gluten) and often eggs"),
    ("tempura", &[Gluten, Egg], "Tempura batter contains flour (gluten) and eggs"),
    ("panko", &[Gluten], "Panko breadcrumbs contain gluten"),
    ("fried", &[Gluten, Soy], "Fried items often use flour (gluten) and soy oil"),
    ("coconut aminos", &[TreeNut], "Coconut aminos are made from coconut"),
    ("scallion", &[OnionGarlic], "Scallions are in the onion family"),
    ("shallot", &[OnionGarlic], "Shallots are in the onion family"),
    ("leek", &[OnionGarlic], "Leeks are in the onion family"),
    ("chive", &[OnionGarlic], "Chives are in the onion family"),
];

#[derive(Debug, Clone)]
struct ConflictEntry {
    matcher: PhraseMatcher,
    allergens: Vec<Allergen>,
    reason: String,
}

/// Allergens carried by the items the kitchen can substitute in.
/// Items not listed are assumed to carry none.
#[derive(Debug, Clone)]
pub struct SubstitutionConflicts {
    entries: Vec<ConflictEntry>,
}

impl SubstitutionConflicts {
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_entries(BUILTIN_CONFLICTS.iter().copied())
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a [Allergen], &'a str)>,
    {
        let entries = entries
            .into_iter()
            .map(|(pattern, allergens, reason)| {
                Ok(ConflictEntry {
                    matcher: PhraseMatcher::new(pattern)?,
                    allergens: allergens.to_vec(),
                    reason: reason.to_string(),
                })
            })
            .collect::<Result<Vec<ConflictEntry>, CoreError>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reasons `replacement` is unsafe for any of `selected`, one per
    /// offending allergen.
    pub fn reasons_for(&self, replacement: &str, selected: &[Allergen]) -> Vec<String> {
        let mut seen: Vec<Allergen> = Vec::new();
        let mut reasons: Vec<String> = Vec::new();

        for entry in self.entries.iter().filter(|e| e.matcher.is_match(replacement)) {
            for allergen in &entry.allergens {
                if selected.contains(allergen) && !seen.contains(allergen) {
                    seen.push(*allergen);
                    if !reasons.contains(&entry.reason) {
                        reasons.push(entry.reason.clone());
                    }
                }
            }
        }

        reasons
    }
}

/// Drops every proposed replacement that would bring back an item another
/// selected exclusion rules out. The removal itself is kept and the dropped
/// replacement is recorded on the result.
pub fn reject_conflicting_substitutions(
    results: &mut [ExclusionResult],
    knowledge: &SafetyKnowledge,
) {
    let exclusions: Vec<Exclusion> = results.iter().map(|r| r.exclusion.clone()).collect();

    for result in results.iter_mut() {
        let others: Vec<&Exclusion> = exclusions
            .iter()
            .filter(|e| **e != result.exclusion)
            .collect();
        if others.is_empty() {
            continue;
        }

        let instructions = std::mem::take(&mut result.instructions);
        for instruction in instructions {
            let Some(replacement) = instruction.replacement().map(str::to_string) else {
                result.instructions.push(instruction);
                continue;
            };

            let reasons = conflict_reasons(&replacement, &others, knowledge);
            if reasons.is_empty() {
                result.instructions.push(instruction);
                continue;
            }

            debug!("Rejected substitution '{}': {}", replacement, reasons.join("; "));
            let removal = instruction.without_replacement();
            result.rejected_substitutions.push(RejectedSubstitution {
                item: removal_item(&removal),
                replacement,
                reason: reasons.join("; "),
            });
            result.instructions.push(removal);
        }
    }
}

pub(crate) fn conflict_reasons(
    replacement: &str,
    others: &[&Exclusion],
    knowledge: &SafetyKnowledge,
) -> Vec<String> {
    let mut reasons: Vec<String> = Vec::new();

    for exclusion in others {
        let found = match exclusion {
            Exclusion::Allergen(allergen) => {
                let listed = knowledge.conflicts.reasons_for(replacement, &[*allergen]);
                if listed.is_empty() {
                    // Known preparations are checked through their sub-ingredients.
                    let terms = knowledge.lexicon.matchers(*allergen);
                    let carriers = knowledge
                        .composites
                        .matching_sub_ingredients(replacement, terms);
                    carriers
                        .first()
                        .map(|c| format!("{} contains {}", replacement, c))
                        .into_iter()
                        .collect()
                } else {
                    listed
                }
            }
            Exclusion::Custom(term) => {
                let variants = custom_term_variants(term);
                let contained = variants.iter().any(|v| has_phrase(replacement, v))
                    || knowledge
                        .composites
                        .sub_ingredients_of(replacement)
                        .iter()
                        .any(|sub| variants.iter().any(|v| has_phrase(sub, v)));
                if contained {
                    vec![format!("{} contains {}", replacement, term)]
                } else {
                    Vec::new()
                }
            }
        };

        for reason in found {
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
    }

    reasons
}

fn removal_item(instruction: &Instruction) -> String {
    match instruction {
        Instruction::Remove { item, .. } | Instruction::Substitute { item, .. } => item.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        allergen::entities::AllergenFlag,
        safety::{
            entities::{SafetyStatus, VerdictBasis},
            knowledge::shared_knowledge,
        },
    };

    fn result(exclusion: Exclusion, instructions: Vec<Instruction>) -> ExclusionResult {
        ExclusionResult {
            exclusion,
            flag: Some(AllergenFlag::Unspecified),
            found_ingredients: Vec::new(),
            status: SafetyStatus::Unsafe,
            can_be_modified: true,
            instructions,
            basis: VerdictBasis::Automatic,
            rejected_substitutions: Vec::new(),
        }
    }

    fn sub_bun() -> Instruction {
        Instruction::Remove {
            item: "bun".to_string(),
            contains: Vec::new(),
            replacement: Some("gluten-free bun".to_string()),
        }
    }

    #[test]
    fn test_reasons_for_selected_allergens_only() {
        let conflicts = &shared_knowledge().conflicts;

        assert_eq!(
            conflicts.reasons_for("gluten-free bun", &[Egg]),
            vec!["Gluten-free bun contains melted butter (dairy) and whole eggs"]
        );
        assert!(conflicts.reasons_for("gluten-free bun", &[Sesame]).is_empty());
        assert!(conflicts.reasons_for("oil", &Allergen::ALL).is_empty());
    }

    #[test]
    fn test_conflicting_replacement_is_dropped_and_recorded() {
        let knowledge = shared_knowledge();
        let mut results = vec![
            result(Exclusion::Allergen(Gluten), vec![sub_bun()]),
            result(Exclusion::Allergen(Egg), Vec::new()),
        ];

        reject_conflicting_substitutions(&mut results, &knowledge);

        assert_eq!(results[0].instruction_lines(), vec!["NO bun"]);
        assert_eq!(results[0].rejected_substitutions.len(), 1);
        assert_eq!(results[0].rejected_substitutions[0].replacement, "gluten-free bun");
        assert!(results[0].rejected_substitutions[0].reason.contains("eggs"));
    }

    #[test]
    fn test_replacement_is_not_checked_against_its_own_exclusion() {
        let knowledge = shared_knowledge();
        let croutons = Instruction::Substitute {
            item: "croutons".to_string(),
            replacement: "gluten-free croutons".to_string(),
        };
        let mut results = vec![result(Exclusion::Allergen(Gluten), vec![croutons])];

        reject_conflicting_substitutions(&mut results, &knowledge);

        assert_eq!(results[0].instruction_lines(), vec!["SUB gluten-free croutons"]);
        assert!(results[0].rejected_substitutions.is_empty());
    }

    #[test]
    fn test_composite_dressing_checked_against_custom_terms() {
        let knowledge = shared_knowledge();
        let dressing = Instruction::Remove {
            item: "ranch".to_string(),
            contains: vec!["buttermilk".to_string()],
            replacement: Some("balsamic vinaigrette".to_string()),
        };
        let mut results = vec![
            result(Exclusion::Allergen(Dairy), vec![dressing]),
            result(Exclusion::Custom("garlic".to_string()), Vec::new()),
        ];

        reject_conflicting_substitutions(&mut results, &knowledge);

        assert_eq!(
            results[0].instruction_lines(),
            vec!["NO ranch (contains: buttermilk)"]
        );
        assert_eq!(
            results[0].rejected_substitutions[0].reason,
            "balsamic vinaigrette contains garlic"
        );
    }
}
