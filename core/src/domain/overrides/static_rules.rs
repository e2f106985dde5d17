use std::collections::HashMap;

use crate::domain::{allergen::entities::Allergen, overrides::entities::OverrideRecord};

type StaticRule = (&'static str, Allergen, &'static [&'static str], bool);

const BUILTIN_RULES: &[StaticRule] = &[
    // starters
    ("mediterranean_chicken_skewers", Allergen::Dairy, &["NO yogurt sauce"], true),
    ("shrimp_cocktail", Allergen::Dairy, &[], true),
    ("oven_roasted_lump_crab_cakes", Allergen::Dairy, &["NO mustard mayonnaise"], true),
    // salads
    ("field_salad", Allergen::Dairy, &[], true),
    ("greek_salad", Allergen::Dairy, &["NO feta cheese", "NO dressing"], true),
    (
        "steak_and_blue_cheese_salad",
        Allergen::Dairy,
        &["NO cheese", "NO crispy onions", "NO ranch dressing"],
        true,
    ),
    ("caesar_salad", Allergen::Dairy, &[], false),
    // sandwiches
    ("all_natural_turkey_burger", Allergen::Dairy, &["NO cheese", "NO butter on bun"], true),
    (
        "roasted_prime_rib_french_dip",
        Allergen::Dairy,
        &["NO butter on bread", "NO horseradish cream sauce"],
        true,
    ),
    ("sliced_turkey_sandwich", Allergen::Dairy, &["NO cheese", "NO butter on bread"], true),
    // steaks
    (
        "petite_filet_mignon_filet_mignon",
        Allergen::Dairy,
        &["NO pre-marking butter", "NO steak butter", "NO garlic crouton"],
        true,
    ),
    (
        "horseradish_crusted_filet",
        Allergen::Dairy,
        &["NO horseradish crust", "NO steak butter", "NO pre-marking butter"],
        true,
    ),
    ("new_york_strip_steak", Allergen::Dairy, &["NO steak butter", "NO pre-marking butter"], true),
    ("porterhouse", Allergen::Dairy, &["NO steak butter", "NO pre-marking butter"], true),
    ("roumanian_skirt_steak", Allergen::Dairy, &["NO steak butter", "NO pre-marking butter"], true),
    ("roasted_prime_rib", Allergen::Dairy, &["NO horseradish cream sauce"], true),
    // seafood
    ("cedar_planked_salmon", Allergen::Dairy, &["NO glaze"], true),
    ("lump_crab_cakes", Allergen::Dairy, &["NO mustard mayo"], true),
    // sides
    ("idaho_baked_potato", Allergen::Dairy, &["NO sour cream", "NO butter"], true),
    ("bbq_rubbed_sweet_potato", Allergen::Dairy, &["NO butter"], true),
    ("red_skin_mashed_potatoes", Allergen::Dairy, &[], false),
    ("creamed_spinach", Allergen::Dairy, &[], false),
    ("au_gratin_potatoes", Allergen::Dairy, &[], false),
    ("mac_and_cheese", Allergen::Dairy, &[], false),
    // desserts
    ("jd_s_cheesecake", Allergen::Dairy, &[], false),
    ("key_lime_pie", Allergen::Dairy, &[], false),
    // kids and brunch
    ("grilled_cheese_and_fries", Allergen::Dairy, &[], false),
    ("macaroni_and_cheese", Allergen::Dairy, &[], false),
    ("eggs_benedict", Allergen::Dairy, &[], false),
    ("wildfire_pancakes", Allergen::Dairy, &[], false),
    ("avocado_toast", Allergen::Dairy, &["NO butter on toast", "NO cheese in eggs"], true),
];

/// Built-in rule table served while no override snapshot has been loaded.
#[derive(Debug, Clone, Default)]
pub struct StaticOverrideTable {
    rules: HashMap<(String, Allergen), OverrideRecord>,
}

impl StaticOverrideTable {
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_RULES
                .iter()
                .map(|(dish_id, allergen, instructions, can_be_modified)| {
                    (
                        *dish_id,
                        *allergen,
                        OverrideRecord::new(instructions.iter().copied(), *can_be_modified),
                    )
                }),
        )
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Allergen, OverrideRecord)>,
    {
        let rules = entries
            .into_iter()
            .map(|(dish_id, allergen, record)| ((dish_key(dish_id), allergen), record))
            .collect();

        Self { rules }
    }

    pub fn get(&self, dish_id: &str, allergen: Allergen) -> Option<&OverrideRecord> {
        self.rules.get(&(dish_key(dish_id), allergen))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn count_by_allergen(&self, allergen: Allergen) -> usize {
        self.rules.keys().filter(|(_, a)| *a == allergen).count()
    }
}

pub(crate) fn dish_key(dish_id: &str) -> String {
    dish_id.trim().to_lowercase()
}
