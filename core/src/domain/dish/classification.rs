use crate::domain::{allergen::matching::has_phrase, dish::entities::Dish};

const PROTEIN_TERMS: &[&str] = &[
    "shrimp", "crab", "lobster", "scallop", "scallops", "oysters", "mussels", "clams",
    "calamari", "salmon", "tuna", "cod", "halibut", "trout", "sea bass", "mahi", "swordfish",
    "snapper", "grouper", "chicken", "steak", "filet", "beef", "pork", "lamb", "duck", "turkey",
    "ribs", "prime rib", "burger", "short rib", "veal",
];

const SOUP_TERMS: &[&str] = &["soup", "bisque", "stew", "chili", "gumbo", "chowder"];

const STEAK_CATEGORY_TERMS: &[&str] = &["steak", "steaks", "filet", "filets"];

const OVEN_PREPARED_CUES: &[&str] = &[
    "baked in the oven",
    "baked slowly",
    "roasted to a golden brown in the oven",
    "roasted in the oven",
    "simmered",
    "braised",
    "slow roasted",
    "slowly braised",
];

const EGG_BREAKFAST_TERMS: &[&str] = &[
    "omelet", "omelette", "benedict", "french toast", "pancake", "pancakes", "breakfast",
    "frittata", "quiche",
];

const MIXTURE_CUES: &[&str] = &["consists of a mixture", "mixture of"];

/// Menu-level traits of a dish, read off its name, category and description.
impl Dish {
    pub fn is_salad(&self) -> bool {
        has_phrase(&self.name, "salad")
            || has_phrase(&self.category, "salad")
            || has_phrase(&self.category, "salads")
    }

    pub fn is_caesar(&self) -> bool {
        has_phrase(&self.name, "caesar")
    }

    pub fn is_soup(&self) -> bool {
        SOUP_TERMS
            .iter()
            .any(|t| has_phrase(&self.name, t) || has_phrase(&self.category, t))
            || has_phrase(&self.category, "soups")
    }

    pub fn is_dessert(&self) -> bool {
        has_phrase(&self.category, "dessert") || has_phrase(&self.category, "desserts")
    }

    /// Categories whose steaks always get the house pre-mark and steak butters.
    pub fn is_steak(&self) -> bool {
        STEAK_CATEGORY_TERMS
            .iter()
            .any(|t| has_phrase(&self.category, t))
    }

    pub fn is_egg_breakfast(&self) -> bool {
        EGG_BREAKFAST_TERMS
            .iter()
            .any(|t| has_phrase(&self.name, t) || has_phrase(&self.category, t))
    }

    pub fn is_oven_prepared(&self) -> bool {
        let description = self.description.to_lowercase();
        if description.contains("broiled") || description.contains("grilled") {
            return false;
        }
        OVEN_PREPARED_CUES.iter().any(|cue| description.contains(cue))
    }

    pub fn is_pre_made_mixture(&self) -> bool {
        let description = self.description.to_lowercase();
        MIXTURE_CUES.iter().any(|cue| description.contains(cue))
    }

    /// Dishes finished before the ticket arrives: only their garnishes can
    /// still be left off.
    pub fn is_pre_prepared(&self) -> bool {
        self.is_soup()
            || self.is_dessert()
            || self.is_oven_prepared()
            || (self.is_pre_made_mixture() && !self.is_salad())
            || self.cannot_be_made_safe().is_some()
    }

    /// Proteins named in the dish title, in the order they are listed.
    pub fn main_proteins(&self) -> Vec<&'static str> {
        PROTEIN_TERMS
            .iter()
            .copied()
            .filter(|p| has_phrase(&self.name, p))
            .collect()
    }

    pub fn is_main_protein(&self, ingredient: &str) -> bool {
        self.main_proteins()
            .iter()
            .any(|p| has_phrase(ingredient, p))
    }
}
