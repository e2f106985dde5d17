use std::collections::HashMap;

use crate::domain::{
    allergen::{
        entities::Allergen,
        lexicon::AllergenLexicon,
        matching::{PhraseMatcher, collect_mentions},
    },
    common::entities::app_errors::CoreError,
};

const BUILTIN_COMPOSITES: &[(&str, &[&str])] = &[
    // sauces and dressings
    ("buttermilk", &["milk", "cultured milk", "lactic acid"]),
    (
        "ranch dressing",
        &[
            "mayonnaise", "buttermilk", "sour cream", "garlic", "onion", "dill", "parsley",
            "chives", "salt", "pepper",
        ],
    ),
    (
        "ranch",
        &[
            "mayonnaise", "buttermilk", "sour cream", "garlic", "onion", "dill", "parsley",
            "chives", "salt", "pepper",
        ],
    ),
    ("yogurt sauce", &["yogurt", "garlic", "lemon juice", "salt", "pepper", "dill"]),
    (
        "horseradish cream sauce",
        &["horseradish", "sour cream", "mayonnaise", "lemon juice", "salt", "pepper"],
    ),
    (
        "béarnaise",
        &["butter", "egg yolk", "white wine vinegar", "shallots", "tarragon", "chervil", "pepper"],
    ),
    ("hollandaise", &["butter", "egg yolk", "lemon juice", "salt", "cayenne pepper"]),
    ("aioli", &["mayonnaise", "garlic", "lemon juice", "olive oil"]),
    ("ancho mayo", &["mayonnaise", "ancho chili", "lime juice", "garlic"]),
    ("spicy mayo", &["mayonnaise", "sriracha", "lime juice", "garlic"]),
    ("mustard mayonnaise", &["mayonnaise", "mustard", "dijon mustard"]),
    ("tartar sauce", &["mayonnaise", "pickle relish", "lemon juice", "capers", "onion"]),
    (
        "cocktail sauce",
        &[
            "ketchup", "horseradish", "lemon juice", "worcestershire sauce", "hot sauce", "salt",
            "pepper",
        ],
    ),
    (
        "apricot dipping sauce",
        &["apricot preserves", "soy sauce", "rice wine vinegar", "ginger", "garlic"],
    ),
    (
        "coconut dipping sauce",
        &[
            "coconut milk", "dark brown sugar", "rice wine vinegar", "tamari", "ginger",
            "chili paste",
        ],
    ),
    (
        "barbecue sauce",
        &[
            "ketchup", "brown sugar", "vinegar", "worcestershire sauce", "mustard", "garlic",
            "onion",
        ],
    ),
    (
        "bbq sauce",
        &[
            "ketchup", "brown sugar", "vinegar", "worcestershire sauce", "mustard", "garlic",
            "onion",
        ],
    ),
    ("hot honey sauce", &["honey", "hot sauce", "butter", "vinegar"]),
    (
        "balsamic vinaigrette",
        &["balsamic vinegar", "olive oil", "dijon mustard", "garlic", "salt", "pepper"],
    ),
    ("lemon herb vinaigrette", &["lemon juice", "olive oil", "herbs", "garlic", "salt", "pepper"]),
    (
        "lemon parmesan vinaigrette",
        &["lemon juice", "olive oil", "parmesan cheese", "garlic", "salt", "pepper"],
    ),
    (
        "red wine vinaigrette",
        &["red wine vinegar", "olive oil", "dijon mustard", "garlic", "salt", "pepper"],
    ),
    ("citrus lime vinaigrette", &["lime juice", "orange juice", "olive oil", "honey", "salt"]),
    (
        "caesar dressing",
        &[
            "anchovy", "garlic", "lemon juice", "dijon mustard", "asiago cheese",
            "pasteurized egg yolk", "red wine vinegar", "house oil", "salt", "pepper",
        ],
    ),
    ("tomato basil sauce", &["tomato", "basil", "garlic", "olive oil", "salt", "pepper"]),
    ("au jus", &["beef stock", "onion", "garlic", "worcestershire sauce", "salt", "pepper"]),
    (
        "mint chimichurri",
        &["mint", "parsley", "garlic", "olive oil", "red wine vinegar", "salt", "pepper"],
    ),
    (
        "mushroom gravy",
        &[
            "mushrooms", "butter", "flour", "chicken stock", "whipping cream", "heavy cream",
            "onion", "garlic", "salt", "pepper",
        ],
    ),
    ("lemon butter sauce", &["butter", "lemon juice", "salt", "pepper"]),
    (
        "cherry sauce",
        &[
            "honey", "shallots", "orange juice", "thyme", "balsamic vinegar", "cherry juice",
            "duck stock", "cherries", "cornstarch", "butter", "pepper",
        ],
    ),
    // marinades and spice blends
    (
        "mediterranean marinade",
        &["olive oil", "lemon juice", "garlic", "oregano", "thyme", "rosemary", "salt", "pepper"],
    ),
    (
        "steak marinade",
        &["soy sauce", "worcestershire sauce", "garlic", "onion", "olive oil", "black pepper"],
    ),
    (
        "bourbon marinade",
        &["bourbon", "soy sauce", "brown sugar", "garlic", "ginger", "worcestershire sauce"],
    ),
    (
        "herb chicken marinade",
        &[
            "cayenne pepper", "oregano", "thyme", "tarragon", "curry powder", "rosemary", "garlic",
            "salt", "pepper", "olive oil", "dried onions", "chicken stock", "butter",
            "dijon mustard",
        ],
    ),
    (
        "blackening spice",
        &[
            "paprika", "cayenne", "garlic powder", "onion powder", "thyme", "oregano", "salt",
            "pepper",
        ],
    ),
    ("char-crust", &["spices", "salt", "pepper", "garlic", "onion"]),
    (
        "old bay seasoning",
        &[
            "celery salt", "paprika", "black pepper", "cayenne", "mustard", "ginger", "allspice",
            "bay leaf",
        ],
    ),
    // sides and garnishes
    ("coleslaw", &["cabbage", "carrots", "mayonnaise", "vinegar", "sugar", "salt", "pepper"]),
    ("coleslaw dressing", &["mayonnaise", "vinegar", "sugar", "salt", "pepper", "celery seed"]),
    ("garlic crouton", &["bread", "garlic", "butter", "salt", "pepper"]),
    ("garlic croutons", &["bread", "garlic", "butter", "salt", "pepper"]),
    ("creamed spinach", &["spinach", "cream", "butter", "flour", "nutmeg", "salt", "pepper"]),
    (
        "au gratin potatoes",
        &["potatoes", "cream", "white cheddar cheese", "butter", "salt", "pepper"],
    ),
    ("crispy onions", &["onions", "flour", "salt", "spices"]),
    ("roasted onions", &["onions", "oil", "salt", "pepper"]),
    (
        "wild rice",
        &[
            "long grain rice", "brown rice", "wild rice pieces", "onions", "garlic", "thyme",
            "butter", "house oil", "salt", "pepper", "vegetable stock", "red peppers", "corn",
            "peas", "scallions",
        ],
    ),
    (
        "roasted root vegetables",
        &[
            "turnips", "parsnips", "carrots", "shallots", "garlic", "thyme", "rosemary", "salt",
            "pepper", "house oil",
        ],
    ),
    // butters and crusts
    ("garlic butter", &["butter", "garlic", "parsley"]),
    ("steak butter", &["butter", "herbs", "garlic", "salt", "pepper"]),
    ("pre-mark butter", &["butter", "herbs", "garlic"]),
    ("premark butter", &["butter", "herbs", "garlic"]),
    ("horseradish crust", &["horseradish", "breadcrumbs", "parmesan", "butter"]),
    ("peppercorn crust", &["black peppercorns", "breadcrumbs", "butter"]),
    ("parmesan crust", &["parmesan cheese", "breadcrumbs", "butter"]),
    ("mushroom crust", &["mushrooms", "breadcrumbs", "butter", "garlic"]),
    ("garlic crust", &["garlic", "breadcrumbs", "butter", "parsley"]),
    ("blue cheese crust", &["blue cheese", "breadcrumbs", "butter"]),
    ("coconut crumbs", &["coconut", "garlic butter", "parsley", "japanese breadcrumbs"]),
    ("japanese breadcrumbs", &["breadcrumbs", "panko"]),
    ("garlic breadcrumbs", &["breadcrumbs", "garlic", "butter", "parsley", "salt", "pepper"]),
    ("cornbread crumbs", &["cornmeal", "flour", "butter", "salt", "baking powder"]),
    ("breading", &["flour", "egg", "breadcrumbs"]),
    ("batter", &["flour", "egg", "milk", "baking powder"]),
    ("fried chicken batter", &["flour", "egg", "buttermilk", "spices"]),
    ("egg batter", &["eggs", "milk", "flour", "salt", "pepper"]),
    ("seasoned flour", &["flour", "salt", "pepper", "spices"]),
    // stocks and bases
    (
        "chicken stock",
        &["chicken", "onion", "carrot", "celery", "garlic", "herbs", "salt", "pepper"],
    ),
    ("chicken jus", &["chicken stock", "chicken drippings", "onion", "garlic"]),
    ("lobster base", &["lobster", "shellfish", "salt", "spices"]),
    ("shrimp poaching liquid", &["shrimp", "shellfish", "water", "salt"]),
    ("clam juice", &["clams", "shellfish", "water", "salt"]),
    (
        "reduced braising liquid",
        &[
            "beef stock", "chicken stock", "cornstarch", "butter", "onion", "garlic", "carrots",
            "celery",
        ],
    ),
    // condiments
    ("ketchup", &["tomato", "vinegar", "sugar", "salt", "spices"]),
    ("mustard", &["mustard seeds", "vinegar", "salt", "spices"]),
    ("dijon mustard", &["mustard seeds", "white wine", "vinegar", "salt"]),
    ("honey dijon mustard", &["honey", "dijon mustard", "mustard seeds", "vinegar"]),
    (
        "worcestershire sauce",
        &["vinegar", "molasses", "anchovy", "tamari", "onion", "garlic", "spices"],
    ),
    ("tamari", &["soybeans", "water", "salt"]),
    ("soy sauce", &["soybeans", "wheat", "water", "salt"]),
    ("teriyaki", &["soy sauce", "sugar", "mirin", "sake", "ginger", "garlic"]),
    ("tomato jam", &["tomatoes", "sugar", "vinegar", "salt", "spices"]),
    // breads and cheeses
    ("sesame seed bun", &["wheat flour", "sesame seeds", "water", "yeast", "salt", "sugar"]),
    ("buttery onion bun", &["wheat flour", "onions", "butter", "yeast", "salt", "sugar"]),
    (
        "multi-grain bread",
        &["wheat flour", "multi-grain flour", "water", "yeast", "salt", "sugar", "seeds"],
    ),
    ("brioche bread", &["wheat flour", "eggs", "butter", "milk", "yeast", "salt", "sugar"]),
    ("english muffin", &["wheat flour", "water", "yeast", "salt", "sugar", "cornmeal"]),
    ("buttermilk biscuit", &["flour", "buttermilk", "butter", "baking powder", "salt"]),
    (
        "buttermilk pancakes",
        &["flour", "buttermilk", "eggs", "baking powder", "salt", "sugar", "butter"],
    ),
    ("elbow macaroni", &["wheat", "flour", "water", "eggs"]),
    ("saltine crackers", &["flour", "salt", "baking soda"]),
    ("half and half", &["milk", "cream"]),
    ("whipping cream", &["cream", "milk"]),
    ("white cheddar cheese", &["milk", "cheese", "cultures", "enzymes", "salt"]),
    ("american cheese", &["milk", "cheese", "cultures", "enzymes", "salt"]),
    ("swiss cheese", &["milk", "cheese", "cultures", "enzymes", "salt"]),
    ("jalapeno jack", &["milk", "cheese", "jalapeno peppers", "cultures", "enzymes", "salt"]),
    // desserts
    (
        "chocolate cake",
        &[
            "eggs", "canola oil", "milk", "vanilla extract", "flour", "sugar", "baking powder",
            "baking soda", "salt", "cocoa powder", "water",
        ],
    ),
    ("hot fudge", &["chocolate", "sugar", "cream", "butter", "vanilla"]),
    ("whipped cream", &["heavy cream", "sugar", "vanilla"]),
    ("pie crust", &["flour", "butter", "salt", "water"]),
    ("graham cracker crust", &["graham crackers", "butter", "sugar"]),
    (
        "key lime filling",
        &["key lime juice", "egg yolks", "sweetened condensed milk", "sugar", "lemon juice"],
    ),
    ("cream cheese filling", &["cream cheese", "sugar", "eggs", "salt", "vanilla"]),
    (
        "chocolate chip cookie",
        &[
            "butter", "sugar", "brown sugar", "vanilla", "eggs", "flour", "salt", "baking powder",
            "chocolate chips",
        ],
    ),
    ("vanilla ice cream", &["milk", "cream", "sugar", "vanilla", "egg yolks"]),
    (
        "warm berry sauce",
        &["raspberries", "strawberries", "blackberries", "sugar", "cornstarch", "water"],
    ),
];

#[derive(Debug, Clone)]
struct CompositeEntry {
    matcher: PhraseMatcher,
    sub_ingredients: Vec<String>,
}

/// Named preparations and the raw ingredients they are made of.
/// Expansion is single-level: sub-ingredients are never expanded again.
#[derive(Debug, Clone)]
pub struct CompositeTable {
    entries: Vec<CompositeEntry>,
    index: HashMap<String, usize>,
}

impl CompositeTable {
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_entries(BUILTIN_COMPOSITES.iter().copied())
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (name, subs) in entries {
            let key = name.trim().to_lowercase();
            let entry = CompositeEntry {
                matcher: PhraseMatcher::new(&key)?,
                sub_ingredients: subs.iter().map(|s| s.trim().to_lowercase()).collect(),
            };

            match table.index.get(&key) {
                Some(&position) => table.entries[position] = entry,
                None => {
                    table.index.insert(key, table.entries.len());
                    table.entries.push(entry);
                }
            }
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Option<&CompositeEntry> {
        self.index
            .get(&name.trim().to_lowercase())
            .and_then(|&position| self.entries.get(position))
    }

    pub fn is_composite(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn matcher(&self, name: &str) -> Option<&PhraseMatcher> {
        self.entry(name).map(|e| &e.matcher)
    }

    /// Constituents of `name`, empty when it is not a known composite.
    pub fn sub_ingredients_of(&self, name: &str) -> &[String] {
        self.entry(name)
            .map(|e| e.sub_ingredients.as_slice())
            .unwrap_or_default()
    }

    /// Sub-ingredients of `name` that carry one of the given terms.
    /// Matching only runs one way: the sub-ingredient must contain the term.
    pub fn matching_sub_ingredients(&self, name: &str, terms: &[PhraseMatcher]) -> Vec<String> {
        self.sub_ingredients_of(name)
            .iter()
            .filter(|sub| terms.iter().any(|t| t.is_match(sub)))
            .cloned()
            .collect()
    }

    pub fn composite_contains_allergen(
        &self,
        name: &str,
        allergen: Allergen,
        lexicon: &AllergenLexicon,
    ) -> bool {
        self.sub_ingredients_of(name)
            .iter()
            .any(|sub| lexicon.contains_term(sub, allergen))
    }

    /// Composite names mentioned in free text, most specific first.
    pub fn find_in_text(&self, text: &str) -> Vec<String> {
        collect_mentions(text, self.entries.iter().map(|e| &e.matcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::knowledge::shared_knowledge;

    fn tables() -> (&'static CompositeTable, &'static AllergenLexicon) {
        let knowledge = shared_knowledge();
        (&knowledge.composites, &knowledge.lexicon)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (composites, _) = tables();

        assert_eq!(
            composites.sub_ingredients_of("  Garlic Butter "),
            &["butter", "garlic", "parsley"]
        );
        assert!(composites.sub_ingredients_of("unicorn glaze").is_empty());
    }

    #[test]
    fn test_composite_contains_allergen() {
        let (composites, lexicon) = tables();
        let contains = |name: &str, allergen| {
            composites.composite_contains_allergen(name, allergen, lexicon)
        };

        assert!(contains("caesar dressing", Allergen::Egg));
        assert!(contains("caesar dressing", Allergen::Fish));
        assert!(contains("soy sauce", Allergen::Gluten));
        assert!(!contains("tamari", Allergen::Gluten));
    }

    #[test]
    fn test_expansion_is_single_level() {
        // teriyaki lists "soy sauce", whose own wheat must not leak through
        let (composites, lexicon) = tables();

        assert!(composites.composite_contains_allergen("teriyaki", Allergen::Soy, &lexicon));
        assert!(!composites.composite_contains_allergen("teriyaki", Allergen::Gluten, &lexicon));
    }

    #[test]
    fn test_matching_is_one_directional() {
        let composites =
            CompositeTable::from_entries([("herb oil", &["garlic", "olive oil"][..])]).unwrap();
        let dairy = vec![PhraseMatcher::new("garlic butter").unwrap()];

        assert!(composites.matching_sub_ingredients("herb oil", &dairy).is_empty());
    }

    #[test]
    fn test_find_in_text_prefers_longer_names() {
        let (composites, _) = tables();

        let found = composites.find_in_text("Served with Ranch Dressing and cocktail sauce");

        assert_eq!(found, vec!["Ranch Dressing", "cocktail sauce"]);
    }
}
