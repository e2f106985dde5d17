use crate::domain::allergen::matching::{find_phrase, sentences};

pub const APPLIED_LAYER_PHRASES: &[&str] =
    &["brushed with", "glazed with", "drizzled with", "basted with"];

pub const MARINADE_PHRASES: &[&str] = &["marinated in", "marinated with"];

pub const CRUST_PHRASES: &[&str] = &["crusted with", "encrusted with", "crust of"];

const CLAUSE_BREAKS: &[&str] = &["and", "before", "until", "while", "or"];

/// Text introduced by each occurrence of `phrases` in the description, cut
/// at the end of its clause. Returned lowercase.
pub fn clauses_after(description: &str, phrases: &[&str]) -> Vec<String> {
    let mut clauses = Vec::new();

    for sentence in sentences(description) {
        for phrase in phrases {
            let mut from = 0;
            while let Some(start) = find_phrase(&sentence, phrase, from) {
                let end = start + phrase.len();
                let clause = clause_head(&sentence[end..]);
                if !clause.is_empty() {
                    clauses.push(clause);
                }
                from = end;
            }
        }
    }

    clauses
}

/// Leading clause of `rest`: stops at a comma, at "then", or where a
/// conjunction starts a new cooking step ("and broiled", "before baked").
fn clause_head(rest: &str) -> String {
    let rest = rest.split(',').next().unwrap_or_default();
    let words: Vec<&str> = rest.split_whitespace().collect();

    let mut kept: Vec<&str> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let next_is_step = words.get(i + 1).is_some_and(|next| next.ends_with("ed"));
        if *word == "then" || (CLAUSE_BREAKS.contains(word) && next_is_step) {
            break;
        }
        kept.push(word);
    }

    kept.join(" ")
}

/// Whether any clause contains `term` as a whole word.
pub fn any_clause_mentions(clauses: &[String], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    clauses.iter().any(|c| find_phrase(c, &term, 0).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_stops_at_next_cooking_step() {
        let clauses = clauses_after(
            "Brushed with our seasoning blend and broiled over glowing embers.",
            APPLIED_LAYER_PHRASES,
        );

        assert_eq!(clauses, vec!["our seasoning blend"]);
    }

    #[test]
    fn test_clause_stops_at_comma_and_keeps_lists() {
        let clauses = clauses_after(
            "Chicken marinated in soy and ginger, grilled. Glazed with honey butter",
            &[MARINADE_PHRASES, APPLIED_LAYER_PHRASES].concat(),
        );

        assert_eq!(clauses, vec!["soy and ginger", "honey butter"]);
    }

    #[test]
    fn test_every_occurrence_is_collected() {
        let clauses = clauses_after(
            "Drizzled with lemon oil then drizzled with aged balsamic",
            APPLIED_LAYER_PHRASES,
        );

        assert_eq!(clauses, vec!["lemon oil", "aged balsamic"]);
    }

    #[test]
    fn test_any_clause_mentions() {
        let clauses = vec!["melted butter".to_string()];

        assert!(any_clause_mentions(&clauses, "Butter"));
        assert!(!any_clause_mentions(&clauses, "cheese"));
    }
}
