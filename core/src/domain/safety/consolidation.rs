use tracing::debug;

use crate::domain::{
    allergen::matching::has_phrase,
    safety::{
        conflicts::conflict_reasons,
        entities::{
            ConsolidatedModifications, ConsolidatedRemovals, Exclusion, ExclusionResult,
            Instruction, RejectedOption,
        },
        knowledge::SafetyKnowledge,
    },
};

pub const NO_BREAD: &str = "NO bread/bun";
pub const NO_BREAD_ASK: &str = "NO bread/bun (or ask for alternative)";

// Spellings folded together before two lines are compared.
const EQUIVALENTS: &[(&str, &str)] = &[
    ("mayonnaise", "mayo"),
    ("gluten-free bun", "gf bun"),
    ("gluten free bun", "gf bun"),
];

const BREAD_WORDS: &[&str] = &["bun", "buns", "bread"];
const BUTTER_ON_BREAD: &[&str] = &["butter on", "butter for"];
const GARNISH_CUES: &[&str] = &[
    "cheese", "scallion", "lettuce", "tomato", "pickle", "bacon", "coleslaw", "butter",
];
const SAUCE_CUES: &[&str] = &[
    "mayo", "sauce", "aioli", "dressing", "vinaigrette", "drizzle", "cream", "au jus",
    "horseradish", "ketchup", "mustard",
];
const SEASONING_CUES: &[&str] = &["crust", "spice", "blacken", "seasoning", "rub", "za'atar"];
const PREPARATION_CUES: &[&str] = &["clean", "grill", "fresh", "separate"];
const PROTEIN_CUES: &[&str] = &["chicken", "plain ", "marinated"];
const BREAD_NAMES: &[&str] = &["ciabatta", "sourdough", "focaccia", "gf "];
const GLUTEN_FREE_CUES: &[&str] = &["gluten free", "gluten-free", "gf "];
const SPECIFIC_BREAD_CUES: &[&str] = &["wheat", "multi-grain", "sesame", "onion"];

/// Part of the plate a kitchen line touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationCategory {
    Bread,
    Sauce,
    Garnish,
    Seasoning,
    Preparation,
    Protein,
    Other,
}

fn is_removal(line: &str) -> bool {
    line.trim_start().to_lowercase().starts_with("no ")
}

fn is_substitution(line: &str) -> bool {
    line.trim_start().to_lowercase().starts_with("sub ")
}

/// Lowercase item a line is about, without its verb or trailing parentheses.
fn subject(line: &str) -> String {
    let lower = line.trim().to_lowercase();
    let head = lower.split(" (").next().unwrap_or_default();
    head.strip_prefix("no ")
        .or_else(|| head.strip_prefix("sub "))
        .unwrap_or(head)
        .trim()
        .to_string()
}

fn has_cue(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Bread is checked first so "buttery onion bun" never lands with the
/// butters, unless the line is about butter on the bread.
pub fn categorize(line: &str) -> ModificationCategory {
    let subject = subject(line);
    let names_bread = BREAD_WORDS.iter().any(|w| has_phrase(&subject, w));

    if names_bread && !has_cue(&subject, BUTTER_ON_BREAD) {
        ModificationCategory::Bread
    } else if subject.contains("steak butter") {
        ModificationCategory::Other
    } else if has_cue(&subject, GARNISH_CUES) {
        ModificationCategory::Garnish
    } else if has_cue(&subject, SAUCE_CUES) {
        ModificationCategory::Sauce
    } else if has_cue(&subject, SEASONING_CUES) {
        ModificationCategory::Seasoning
    } else if !is_removal(line) && !is_substitution(line) && has_cue(&subject, PREPARATION_CUES) {
        ModificationCategory::Preparation
    } else if has_cue(&subject, PROTEIN_CUES) {
        ModificationCategory::Protein
    } else if subject.contains("onion") {
        ModificationCategory::Garnish
    } else if has_cue(&subject, BREAD_NAMES) {
        ModificationCategory::Bread
    } else {
        ModificationCategory::Other
    }
}

fn dedup_key(line: &str) -> String {
    EQUIVALENTS
        .iter()
        .fold(line.trim().to_lowercase(), |key, (long, short)| key.replace(long, short))
}

fn push_distinct(lines: &mut Vec<String>, line: String) {
    let key = dedup_key(&line);
    if !lines.iter().any(|l| dedup_key(l) == key) {
        lines.push(line);
    }
}

fn push_rejected(rejected: &mut Vec<RejectedOption>, option: RejectedOption) {
    let key = dedup_key(&option.option);
    if !rejected.iter().any(|r| dedup_key(&r.option) == key) {
        rejected.push(option);
    }
}

fn removal_group(
    removals: &mut ConsolidatedRemovals,
    category: ModificationCategory,
) -> &mut Vec<String> {
    match category {
        ModificationCategory::Sauce => &mut removals.sauce,
        ModificationCategory::Garnish => &mut removals.garnish,
        ModificationCategory::Seasoning => &mut removals.seasoning,
        _ => &mut removals.other,
    }
}

/// Keeps `line` unless what it brings in clashes with a selected exclusion.
fn accept(
    line: String,
    exclusions: &[&Exclusion],
    knowledge: &SafetyKnowledge,
    rejected: &mut Vec<RejectedOption>,
) -> Option<String> {
    let reasons = conflict_reasons(&subject(&line), exclusions, knowledge);
    if reasons.is_empty() {
        return Some(line);
    }

    debug!("Dropped '{}' while consolidating: {}", line, reasons.join("; "));
    push_rejected(
        rejected,
        RejectedOption {
            option: line,
            reason: reasons.join("; "),
        },
    );
    None
}

fn resolve_bread(
    removals: &[String],
    options: Vec<String>,
    exclusions: &[&Exclusion],
    knowledge: &SafetyKnowledge,
    rejected: &mut Vec<RejectedOption>,
) -> Option<String> {
    let had_options = !options.is_empty();
    let safe: Vec<String> = options
        .into_iter()
        .filter_map(|option| accept(option, exclusions, knowledge, rejected))
        .collect();

    let gluten_free = safe
        .iter()
        .find(|o| has_cue(&o.to_lowercase(), GLUTEN_FREE_CUES));
    if let Some(choice) = gluten_free.or(safe.first()) {
        return Some(choice.clone());
    }

    let no_bun = removals.iter().find(|r| {
        let lower = r.trim().to_lowercase();
        lower.contains("no bun") || lower == "no bread"
    });
    if let Some(no_bun) = no_bun {
        return Some(no_bun.clone());
    }

    if removals.is_empty() {
        return None;
    }
    if rejected
        .iter()
        .any(|r| categorize(&r.option) == ModificationCategory::Bread)
    {
        return Some(NO_BREAD.to_string());
    }
    if !had_options
        && removals
            .iter()
            .any(|r| has_cue(&r.to_lowercase(), SPECIFIC_BREAD_CUES))
    {
        return Some(NO_BREAD_ASK.to_string());
    }
    removals.first().cloned()
}

/// Merges the instructions of every flagged exclusion into one list.
/// Substitutions are checked again against all selected exclusions since
/// override lines arrive verbatim.
pub fn consolidate(
    results: &[ExclusionResult],
    knowledge: &SafetyKnowledge,
) -> ConsolidatedModifications {
    let exclusions: Vec<&Exclusion> = results.iter().map(|r| &r.exclusion).collect();
    let mut consolidated = ConsolidatedModifications::default();
    let mut bread_removals: Vec<String> = Vec::new();
    let mut bread_options: Vec<String> = Vec::new();

    // 1. Replacements already dropped per exclusion
    for dropped in results.iter().flat_map(|r| &r.rejected_substitutions) {
        push_rejected(
            &mut consolidated.rejected,
            RejectedOption {
                option: format!("SUB {}", dropped.replacement),
                reason: dropped.reason.clone(),
            },
        );
    }

    // 2. Sort every line into its component
    for result in results.iter().filter(|r| !r.is_safe()) {
        for instruction in &result.instructions {
            let line = instruction.to_string();
            if matches!(
                instruction,
                Instruction::NotPossible { .. } | Instruction::Verify { .. }
            ) {
                push_distinct(&mut consolidated.notes, line);
                continue;
            }

            let category = categorize(&line);
            let removal = is_removal(&line);
            match category {
                ModificationCategory::Bread if removal => push_distinct(&mut bread_removals, line),
                ModificationCategory::Bread => push_distinct(&mut bread_options, line),
                ModificationCategory::Preparation => {
                    push_distinct(&mut consolidated.preparation, line)
                }
                _ if removal => {
                    push_distinct(removal_group(&mut consolidated.removals, category), line)
                }
                _ => {
                    let rejected = &mut consolidated.rejected;
                    let Some(line) = accept(line, &exclusions, knowledge, rejected) else {
                        continue;
                    };
                    let group = if category == ModificationCategory::Protein {
                        &mut consolidated.substitutions.protein
                    } else {
                        &mut consolidated.substitutions.other
                    };
                    push_distinct(group, line);
                }
            }
        }
    }

    // 3. At most one bread line
    consolidated.bread = resolve_bread(
        &bread_removals,
        bread_options,
        &exclusions,
        knowledge,
        &mut consolidated.rejected,
    );

    // 4. Nothing left to serve once the clashing options are gone
    if consolidated.lines().is_empty() && consolidated.had_conflicts() {
        let reasons: Vec<String> = consolidated
            .rejected
            .iter()
            .map(|r| format!("\"{}\" - {}", r.option, r.reason))
            .collect();
        push_distinct(
            &mut consolidated.notes,
            format!("Cannot accommodate: {}", reasons.join("; ")),
        );
    }

    consolidated
}
