use crate::domain::{
    allergen::matching::{find_phrase, sentences},
    dish::entities::Dish,
    safety::{
        clauses::{MARINADE_PHRASES, any_clause_mentions, clauses_after},
        value_objects::{Mention, MentionSource},
    },
};

const GARNISH_PHRASES: &[&str] = &[
    "garnished with",
    "garnish of",
    "garnish",
    "topped with",
    "served with",
    "drizzled with",
    "sprinkled with",
    "with a side of",
    "side of",
    "accompanied by",
    "ramekin of",
];

const SIDE_SUFFIX: &str = "on the side";

/// Whether `mention` is added after the core preparation and can be left off.
pub fn is_garnish(dish: &Dish, mention: &str) -> bool {
    let mention = mention.trim().to_lowercase();
    if mention.is_empty() {
        return false;
    }

    // 1. The headline protein is the dish itself
    if dish.is_main_protein(&mention) {
        return false;
    }

    // 2. A marinade soaks into the base
    let marinades = clauses_after(&dish.description, MARINADE_PHRASES);
    if any_clause_mentions(&marinades, &mention) {
        return false;
    }

    // 3. Same sentence, after a garnish phrase or inside an "on the side" clause
    sentences(&dish.description)
        .iter()
        .any(|s| follows_garnish_phrase(s, &mention) || in_side_clause(s, &mention))
}

fn follows_garnish_phrase(sentence: &str, mention: &str) -> bool {
    GARNISH_PHRASES.iter().any(|phrase| {
        let mut from = 0;
        while let Some(start) = find_phrase(sentence, phrase, from) {
            if find_phrase(sentence, mention, start + phrase.len()).is_some() {
                return true;
            }
            from = start + phrase.len();
        }
        false
    })
}

fn in_side_clause(sentence: &str, mention: &str) -> bool {
    sentence.split(',').any(|clause| {
        match (find_phrase(clause, mention, 0), find_phrase(clause, SIDE_SUFFIX, 0)) {
            (Some(at), Some(side)) => at < side,
            _ => false,
        }
    })
}

/// House steps, garnishes and applied layers can be dropped without touching
/// the base of the dish.
pub fn is_removable(dish: &Dish, mention: &Mention, applied_layers: &[String]) -> bool {
    mention.source == MentionSource::HouseStep
        || is_garnish(dish, &mention.text)
        || any_clause_mentions(applied_layers, &mention.text)
}
