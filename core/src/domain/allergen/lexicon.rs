use std::collections::HashMap;

use crate::domain::{
    allergen::{
        entities::Allergen,
        matching::{PhraseMatcher, collect_mentions},
    },
    common::entities::app_errors::CoreError,
};

const DAIRY: &[&str] = &[
    "butter", "steak butter", "pre-mark butter", "premark butter", "cream", "cheese", "milk",
    "yogurt", "sour cream", "whipping cream", "whipped cream", "half and half", "buttermilk",
    "parmesan", "asiago", "swiss", "cheddar", "mozzarella", "feta", "blue cheese", "goat cheese",
    "dairy", "margarine", "heavy cream", "whole milk", "skim milk", "cream cheese", "ricotta",
    "ghee", "ice cream", "alfredo", "creme fraiche", "gruyere", "provolone", "brie",
];

const EGG: &[&str] = &[
    "egg", "eggs", "egg yolk", "egg yolks", "egg white", "egg whites", "pasteurized egg",
    "hard-boiled egg", "egg wash", "mayonnaise", "mayo", "béarnaise", "bearnaise",
    "hollandaise", "aioli", "custard", "pudding", "meringue",
];

const GLUTEN: &[&str] = &[
    "flour", "bread", "breadcrumb", "breadcrumbs", "crouton", "croutons", "pasta", "noodle",
    "noodles", "wheat", "barley", "rye", "semolina", "couscous", "bulgur", "farro", "spelt",
    "bun", "buns", "flatbread", "puff pastry", "pie crust", "graham cracker", "graham crackers",
    "cracker", "crackers", "macaroni", "elbow macaroni", "gluten", "breading", "batter", "panko",
    "tortilla", "brioche", "roux", "malt",
];

// Anchovy-derived products sit on both seafood sheets.
const SHELLFISH: &[&str] = &[
    "shrimp", "crab", "lobster", "scallop", "scallops", "oyster", "oysters", "clam", "clams",
    "mussel", "mussels", "crayfish", "crawfish", "prawn", "prawns", "langoustine",
    "langoustines", "shellfish", "shell fish", "lobster base", "clam juice",
    "shrimp poaching liquid", "calamari", "squid", "anchovy", "anchovies", "anchovy paste",
    "worcestershire", "worcestershire sauce",
];

const FISH: &[&str] = &[
    "fish", "salmon", "tuna", "cod", "halibut", "trout", "bass", "mackerel", "sardine",
    "sardines", "anchovy", "anchovies", "anchovy paste", "fish sauce", "worcestershire",
    "worcestershire sauce", "mahi", "swordfish", "snapper", "grouper",
];

const SOY: &[&str] = &[
    "soy", "soybean", "soybeans", "soy sauce", "tamari", "miso", "tofu", "edamame", "tempeh",
    "soybean oil", "soy lecithin", "teriyaki", "soy milk",
];

const PEANUT: &[&str] = &[
    "peanut", "peanuts", "peanut butter", "peanut oil", "groundnut", "groundnuts",
];

const TREE_NUT: &[&str] = &[
    "almond", "almonds", "almond extract", "walnut", "walnuts", "pecan", "pecans", "cashew",
    "cashews", "pistachio", "pistachios", "hazelnut", "hazelnuts", "macadamia",
    "macadamia nut", "macadamia nuts", "brazil nut", "brazil nuts", "pine nut", "pine nuts",
    "pignoli", "chestnut", "chestnuts", "nut", "nuts", "tree nut", "tree nuts", "praline",
    "pesto",
];

const SESAME: &[&str] = &[
    "sesame", "sesame seed", "sesame seeds", "sesame oil", "tahini", "benne", "benne seed",
    "benne seeds", "sesame seed bun",
];

const MSG: &[&str] = &[
    "msg", "monosodium glutamate", "hydrolyzed", "autolyzed", "yeast extract",
    "textured protein", "soy protein", "whey protein", "natural flavor", "artificial flavor",
    "seasoning", "seasonings", "flavor enhancer",
];

const ONION_GARLIC: &[&str] = &[
    "onion", "onions", "garlic", "shallot", "shallots", "scallion", "scallions", "chive",
    "chives", "leek", "leeks", "onion powder", "garlic powder", "garlic puree", "minced garlic",
    "roasted garlic", "garlic crouton", "garlic croutons", "onion soup", "caramelized onions",
    "red onion", "white onion", "yellow onion", "green onion", "green onions", "spring onion",
];

const TOMATO: &[&str] = &[
    "tomato", "tomatoes", "tomato paste", "tomato sauce", "tomato jam", "tomato basil",
    "cherry tomato", "cherry tomatoes", "tomato wedges", "tomato juice", "sun-dried tomato",
    "sun dried tomato", "tomato puree", "marinara", "ketchup", "pico de gallo",
];

const SEED: &[&str] = &[
    "seed", "seeds", "poppy seed", "poppy seeds", "sunflower seed", "sunflower seeds",
    "pumpkin seed", "pumpkin seeds", "pepitas", "flax", "flaxseed", "chia", "mustard seed",
    "mustard seeds", "celery seed", "caraway", "fennel seed", "multi-grain", "multigrain",
];

/// Allergen category to the terms that reveal it in menu text.
#[derive(Debug, Clone)]
pub struct AllergenLexicon {
    entries: HashMap<Allergen, Vec<PhraseMatcher>>,
}

impl AllergenLexicon {
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_entries([
            (Allergen::Dairy, DAIRY),
            (Allergen::Egg, EGG),
            (Allergen::Gluten, GLUTEN),
            (Allergen::Shellfish, SHELLFISH),
            (Allergen::Fish, FISH),
            (Allergen::Soy, SOY),
            (Allergen::Peanut, PEANUT),
            (Allergen::TreeNut, TREE_NUT),
            (Allergen::Sesame, SESAME),
            (Allergen::Msg, MSG),
            (Allergen::OnionGarlic, ONION_GARLIC),
            (Allergen::Tomato, TOMATO),
            (Allergen::Seed, SEED),
        ])
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (Allergen, &'a [&'a str])>,
    {
        let mut compiled: HashMap<Allergen, Vec<PhraseMatcher>> = HashMap::new();
        for (allergen, terms) in entries {
            let matchers = terms
                .iter()
                .map(|term| PhraseMatcher::new(term))
                .collect::<Result<Vec<PhraseMatcher>, CoreError>>()?;
            compiled.entry(allergen).or_default().extend(matchers);
        }

        Ok(Self { entries: compiled })
    }

    pub fn matchers(&self, allergen: Allergen) -> &[PhraseMatcher] {
        self.entries
            .get(&allergen)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn terms(&self, allergen: Allergen) -> impl Iterator<Item = &str> {
        self.matchers(allergen).iter().map(PhraseMatcher::phrase)
    }

    /// Ordered, most-specific occurrences of the allergen's terms in `text`.
    pub fn find_mentions(&self, text: &str, allergen: Allergen) -> Vec<String> {
        collect_mentions(text, self.matchers(allergen))
    }

    /// Whether `fragment` contains one of the allergen's terms as a whole word.
    pub fn contains_term(&self, fragment: &str, allergen: Allergen) -> bool {
        self.matchers(allergen).iter().any(|m| m.is_match(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::knowledge::shared_knowledge;

    #[test]
    fn test_find_mentions_case_insensitive_whole_words() {
        let lexicon = &shared_knowledge().lexicon;

        let mentions = lexicon.find_mentions(
            "Fried chicken marinated in Buttermilk, served with whipped butter",
            Allergen::Dairy,
        );

        assert_eq!(mentions, vec!["Buttermilk", "butter"]);
    }

    #[test]
    fn test_nut_does_not_match_inside_peanut_or_coconut() {
        let lexicon = &shared_knowledge().lexicon;

        assert!(
            lexicon
                .find_mentions("peanut sauce with toasted coconut", Allergen::TreeNut)
                .is_empty()
        );
        assert_eq!(
            lexicon.find_mentions("peanut sauce", Allergen::Peanut),
            vec!["peanut"]
        );
    }

    #[test]
    fn test_anchovy_is_flagged_for_fish_and_shellfish() {
        let lexicon = &shared_knowledge().lexicon;

        assert!(lexicon.contains_term("anchovy", Allergen::Fish));
        assert!(lexicon.contains_term("anchovy", Allergen::Shellfish));
    }

    #[test]
    fn test_synthetic_lexicon() {
        let lexicon =
            AllergenLexicon::from_entries([(Allergen::Seed, &["quinoa"][..])]).unwrap();

        assert_eq!(lexicon.terms(Allergen::Seed).collect::<Vec<_>>(), vec!["quinoa"]);
        assert!(lexicon.find_mentions("quinoa bowl", Allergen::Dairy).is_empty());
    }
}
