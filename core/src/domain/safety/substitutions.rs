use crate::domain::{
    allergen::{entities::Allergen, matching::has_phrase},
    dish::entities::Dish,
    safety::{
        detection::Target,
        entities::Instruction,
        feasibility::FeasibilityVerdict,
        garnish::is_removable,
        value_objects::{Mention, MentionSource},
    },
};

const NOT_MODIFIABLE_FALLBACK: &str = "Unable to safely modify this dish to remove the allergen";

/// Instructions for one exclusion and whether they leave the dish servable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPlan {
    pub instructions: Vec<Instruction>,
    pub can_be_modified: bool,
}

/// Turns a feasibility verdict and the detected mentions into kitchen
/// instructions.
pub fn generate(
    dish: &Dish,
    target: &Target<'_>,
    verdict: &FeasibilityVerdict,
    mentions: &[Mention],
) -> SubstitutionPlan {
    if !verdict.modifiable {
        let reason = verdict.reason.as_deref().unwrap_or(NOT_MODIFIABLE_FALLBACK);
        return SubstitutionPlan {
            instructions: vec![Instruction::not_possible(reason)],
            can_be_modified: false,
        };
    }

    let mut instructions: Vec<Instruction> = Vec::new();
    let mut can_be_modified = true;

    if dish.is_pre_prepared() {
        // Only what goes on after the dish is finished can come off
        for mention in mentions {
            if is_removable(dish, mention, &verdict.applied_layers) {
                instructions.push(removal(dish, target, verdict, mention));
            } else {
                can_be_modified = false;
                instructions.push(Instruction::not_possible(format!(
                    "{} is part of the pre-prepared dish",
                    mention.text
                )));
            }
        }
    } else {
        instructions.extend(mentions.iter().map(|m| removal(dish, target, verdict, m)));
    }

    if instructions.is_empty() {
        instructions.push(Instruction::remove(target.exclusion().label().to_lowercase()));
    }

    let mut seen: Vec<String> = Vec::new();
    instructions.retain(|i| {
        let line = i.to_string().to_lowercase();
        if seen.contains(&line) {
            false
        } else {
            seen.push(line);
            true
        }
    });

    SubstitutionPlan {
        instructions,
        can_be_modified,
    }
}

fn removal(
    dish: &Dish,
    target: &Target<'_>,
    verdict: &FeasibilityVerdict,
    mention: &Mention,
) -> Instruction {
    let item = most_specific_name(dish, mention);

    if mention.source == MentionSource::HouseStep {
        return Instruction::remove(item);
    }

    if target.is(Allergen::Gluten) && dish.is_salad() && has_phrase(&item, "croutons") {
        return Instruction::Substitute {
            item,
            replacement: "gluten-free croutons".to_string(),
        };
    }

    let replacement = replacement_for(target, &item, verdict);
    Instruction::Remove {
        item,
        contains: mention.contains.clone(),
        replacement,
    }
}

/// The longest dish ingredient that names the mention, e.g. "Butter" in the
/// description becomes "clarified butter" from the ingredient list.
fn most_specific_name(dish: &Dish, mention: &Mention) -> String {
    if mention.source != MentionSource::Description {
        return mention.text.clone();
    }

    dish.ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| has_phrase(i, &mention.text))
        .max_by_key(|i| i.len())
        .map(str::to_string)
        .unwrap_or_else(|| mention.text.clone())
}

fn replacement_for(
    target: &Target<'_>,
    item: &str,
    verdict: &FeasibilityVerdict,
) -> Option<String> {
    let has = |phrase: &str| has_phrase(item, phrase);

    if ["dressing", "vinaigrette", "ranch"].iter().any(|p| has(p)) {
        return verdict.safe_dressings.first().cloned();
    }

    let replacement = match target.as_allergen()? {
        Allergen::Dairy if has("butter") && !has("peanut butter") => "oil",
        Allergen::Dairy
            if ["cream", "half and half", "whipping cream", "heavy cream"].iter().any(|p| has(p))
                && !["sour cream", "ice cream", "whipped cream"].iter().any(|p| has(p)) =>
        {
            "non-dairy alternative"
        }
        Allergen::Gluten if ["bun", "buns", "brioche", "roll", "rolls"].iter().any(|p| has(p)) => {
            "gluten-free bun"
        }
        Allergen::Gluten if ["bread", "toast"].iter().any(|p| has(p)) => "gluten-free bread",
        Allergen::Gluten
            if ["flour", "crackers", "pasta", "noodles", "macaroni"].iter().any(|p| has(p)) =>
        {
            "gluten-free alternative"
        }
        Allergen::Soy if ["soy sauce", "tamari", "teriyaki"].iter().any(|p| has(p)) => {
            "coconut aminos"
        }
        Allergen::Sesame if has("sesame seed bun") => "plain bun",
        _ => return None,
    };

    Some(replacement.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::{
        detection::detect_mentions,
        feasibility::{FeasibilityRule, analyze},
        knowledge::shared_knowledge,
    };

    fn plan_for(dish: &Dish, allergen: Allergen) -> SubstitutionPlan {
        let knowledge = shared_knowledge();
        let target = Target::allergen(allergen, &knowledge.lexicon);
        let mentions = detect_mentions(dish, &target, &knowledge.composites);
        let verdict = analyze(dish, &target, &mentions, &knowledge);
        generate(dish, &target, &verdict, &mentions)
    }

    fn lines(plan: &SubstitutionPlan) -> Vec<String> {
        plan.instructions.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_not_modifiable_yields_single_not_possible() {
        let dish = Dish::new("mac", "Mac and Cheese").with_description("Baked with cheddar.");

        let plan = plan_for(&dish, Allergen::Dairy);

        assert!(!plan.can_be_modified);
        assert_eq!(
            lines(&plan),
            vec!["NOT POSSIBLE - Dairy is a core ingredient that defines this dish"]
        );
    }

    #[test]
    fn test_applied_butter_is_swapped_for_oil() {
        let dish = Dish::new("salmon", "Grilled Salmon")
            .with_description("Salmon brushed with melted butter.")
            .with_ingredients(["salmon", "melted butter"]);

        let plan = plan_for(&dish, Allergen::Dairy);

        assert!(plan.can_be_modified);
        assert_eq!(lines(&plan), vec!["NO melted butter (use oil)"]);
    }

    #[test]
    fn test_salad_dressing_and_croutons() {
        let dish = Dish::new("house", "House Salad")
            .with_description("Greens topped with croutons and ranch dressing.");

        assert_eq!(
            lines(&plan_for(&dish, Allergen::Gluten)),
            vec!["SUB gluten-free croutons"]
        );
        assert_eq!(
            lines(&plan_for(&dish, Allergen::Dairy)),
            vec![
                "NO ranch dressing (contains: buttermilk, sour cream) \
                 (use citrus lime vinaigrette)"
            ]
        );
    }

    #[test]
    fn test_pre_prepared_dish_partitions_mentions() {
        let dish = Dish::new("tomato_soup", "Roasted Vegetable Soup")
            .with_description("Vegetables simmered with butter, topped with parmesan.");
        let knowledge = shared_knowledge();
        let target = Target::allergen(Allergen::Dairy, &knowledge.lexicon);
        let mentions = detect_mentions(&dish, &target, &knowledge.composites);
        let verdict = FeasibilityVerdict {
            modifiable: true,
            rule: FeasibilityRule::RemovableOnly,
            reason: None,
            applied_layers: Vec::new(),
            safe_dressings: Vec::new(),
        };

        let plan = generate(&dish, &target, &verdict, &mentions);

        assert!(!plan.can_be_modified);
        assert_eq!(
            lines(&plan),
            vec!["NOT POSSIBLE - butter is part of the pre-prepared dish", "NO parmesan"]
        );
    }

    #[test]
    fn test_garnish_only_on_pre_prepared_dish_stays_modifiable() {
        let dish = Dish::new("soup", "Tortilla Soup")
            .with_description("Chicken broth with vegetables, topped with sour cream.");

        let plan = plan_for(&dish, Allergen::Dairy);

        assert!(plan.can_be_modified);
        assert_eq!(lines(&plan), vec!["NO sour cream"]);
    }

    #[test]
    fn test_generic_fallback_when_nothing_named() {
        let lexicon = &shared_knowledge().lexicon;
        let dish = Dish::new("wings", "Wings");
        let target = Target::allergen(Allergen::Soy, &lexicon);
        let verdict = FeasibilityVerdict {
            modifiable: true,
            rule: FeasibilityRule::RemovableOnly,
            reason: None,
            applied_layers: Vec::new(),
            safe_dressings: Vec::new(),
        };

        let plan = generate(&dish, &target, &verdict, &[]);

        assert_eq!(lines(&plan), vec!["NO soy"]);
    }
}
