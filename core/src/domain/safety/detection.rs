use std::borrow::Cow;

use crate::domain::{
    allergen::{
        composites::CompositeTable,
        entities::Allergen,
        lexicon::AllergenLexicon,
        matching::{PhraseMatcher, collect_mentions, custom_term_variants, has_phrase},
    },
    common::entities::app_errors::CoreError,
    dish::entities::Dish,
    safety::{
        entities::Exclusion,
        value_objects::{Mention, MentionSource},
    },
};

/// House butters every steak is finished with.
pub const STEAK_HOUSE_STEPS: &[&str] = &["pre-mark butter", "steak butter"];

/// An exclusion together with the phrases that reveal it.
#[derive(Debug, Clone)]
pub struct Target<'a> {
    exclusion: Exclusion,
    matchers: Cow<'a, [PhraseMatcher]>,
}

impl<'a> Target<'a> {
    pub fn allergen(allergen: Allergen, lexicon: &'a AllergenLexicon) -> Self {
        Self {
            exclusion: Exclusion::Allergen(allergen),
            matchers: Cow::Borrowed(lexicon.matchers(allergen)),
        }
    }

    pub fn custom(term: &str) -> Result<Self, CoreError> {
        let variants = custom_term_variants(term);
        if variants.is_empty() {
            return Err(CoreError::Invalid);
        }

        let matchers = variants
            .iter()
            .map(|v| PhraseMatcher::new(v))
            .collect::<Result<Vec<PhraseMatcher>, CoreError>>()?;

        Ok(Self {
            exclusion: Exclusion::Custom(term.trim().to_string()),
            matchers: Cow::Owned(matchers),
        })
    }

    pub fn exclusion(&self) -> &Exclusion {
        &self.exclusion
    }

    pub fn as_allergen(&self) -> Option<Allergen> {
        self.exclusion.allergen()
    }

    pub fn is(&self, allergen: Allergen) -> bool {
        self.as_allergen() == Some(allergen)
    }

    pub fn matchers(&self) -> &[PhraseMatcher] {
        &self.matchers
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(text))
    }

    pub fn find_mentions(&self, text: &str) -> Vec<String> {
        collect_mentions(text, self.matchers.iter())
    }
}

/// Every place the dish reveals the target, most specific first: composites
/// carrying it, then free-text and ingredient mentions outside those
/// composites, then house steps.
pub fn detect_mentions(
    dish: &Dish,
    target: &Target<'_>,
    composites: &CompositeTable,
) -> Vec<Mention> {
    let mut mentions: Vec<Mention> = Vec::new();

    // 1. Composites named in the ingredient list or the description
    let mut composite_names: Vec<String> = dish
        .ingredients
        .iter()
        .filter(|i| composites.is_composite(i))
        .map(|i| i.trim().to_string())
        .collect();
    for name in composites.find_in_text(&dish.description) {
        if !composite_names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            composite_names.push(name);
        }
    }

    let mut remaining_description = dish.description.clone();
    for name in composite_names {
        let carriers = composites.matching_sub_ingredients(&name, target.matchers());
        if carriers.is_empty() {
            continue;
        }
        if let Some(matcher) = composites.matcher(&name) {
            remaining_description = matcher.blank_out(&remaining_description);
        }
        push_unique(&mut mentions, Mention::composite(name, carriers));
    }

    // 2. Direct mentions outside the composites already reported
    for text in target.find_mentions(&remaining_description) {
        push_unique(&mut mentions, Mention::new(text, MentionSource::Description));
    }

    // The ingredient list counts for every target, flagged or not
    for ingredient in &dish.ingredients {
        let ingredient = ingredient.trim();
        if composites.is_composite(ingredient) || !target.matches(ingredient) {
            continue;
        }
        // Already covered by a description hit, e.g. "melted butter" by "butter"
        if mentions.iter().any(|m| has_phrase(ingredient, &m.text)) {
            continue;
        }
        push_unique(&mut mentions, Mention::new(ingredient, MentionSource::Ingredient));
    }

    // 3. House steps
    if target.is(Allergen::Dairy) && dish.is_steak() {
        mentions.retain(|m| !STEAK_HOUSE_STEPS.iter().any(|s| m.text.eq_ignore_ascii_case(s)));
        for step in STEAK_HOUSE_STEPS {
            mentions.push(Mention::new(*step, MentionSource::HouseStep));
        }
    }

    mentions
}

fn push_unique(mentions: &mut Vec<Mention>, mention: Mention) {
    if !mentions.iter().any(|m| m.text.eq_ignore_ascii_case(&mention.text)) {
        mentions.push(mention);
    }
}

/// Mention texts in report order.
pub fn mention_texts(mentions: &[Mention]) -> Vec<String> {
    mentions.iter().map(|m| m.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::knowledge::shared_knowledge;

    fn detect(dish: &Dish, allergen: Allergen) -> Vec<Mention> {
        let knowledge = shared_knowledge();
        let target = Target::allergen(allergen, &knowledge.lexicon);
        detect_mentions(dish, &target, &knowledge.composites)
    }

    #[test]
    fn test_composite_hit_hides_its_own_sub_terms() {
        let dish = Dish::new("wedge", "Wedge Salad")
            .with_description("Iceberg wedge served with ranch dressing and crumbled blue cheese.");

        let mentions = detect(&dish, Allergen::Dairy);

        assert_eq!(mention_texts(&mentions), vec!["ranch dressing", "blue cheese"]);
        assert_eq!(mentions[0].source, MentionSource::Composite);
        assert_eq!(mentions[0].contains, vec!["buttermilk", "sour cream"]);
    }

    #[test]
    fn test_composite_only_signal_is_detected() {
        let dish = Dish::new("chicken_tenders", "Chicken Tenders")
            .with_description("Hand-cut tenders.")
            .with_ingredients(["chicken", "tartar sauce"]);

        let mentions = detect(&dish, Allergen::Egg);

        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text, "tartar sauce");
        assert_eq!(mentions[0].contains, vec!["mayonnaise"]);
    }

    #[test]
    fn test_ingredient_list_is_read_for_every_target() {
        let dish = Dish::new("pan_seared_salmon", "Pan Seared Salmon")
            .with_description("Seared salmon fillet.")
            .with_ingredients(["salmon", "butter", "wheat flour"]);

        let dairy = detect(&dish, Allergen::Dairy);
        let gluten = detect(&dish, Allergen::Gluten);

        assert_eq!(mention_texts(&dairy), vec!["butter"]);
        assert_eq!(dairy[0].source, MentionSource::Ingredient);
        assert_eq!(mention_texts(&gluten), vec!["wheat flour"]);

        let garlic = Target::custom("Garlic").unwrap();
        let dish = dish.with_ingredients(["salmon", "minced garlic"]);
        assert_eq!(
            mention_texts(&detect_mentions(&dish, &garlic, &shared_knowledge().composites)),
            vec!["minced garlic"]
        );
    }

    #[test]
    fn test_steak_gets_house_butters() {
        let dish = Dish::new("filet", "Filet Mignon")
            .with_category("Steaks")
            .with_description("Center-cut filet, finished with steak butter.");

        let mentions = detect(&dish, Allergen::Dairy);

        assert_eq!(mention_texts(&mentions), vec!["pre-mark butter", "steak butter"]);
        assert!(mentions.iter().all(|m| m.source == MentionSource::HouseStep));
    }

    #[test]
    fn test_custom_target_rejects_blank_terms() {
        assert!(matches!(Target::custom("   "), Err(CoreError::Invalid)));
        assert!(Target::custom("onion").unwrap().matches("Crispy Onions"));
    }
}
