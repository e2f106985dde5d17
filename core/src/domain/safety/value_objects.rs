use crate::domain::{allergen::entities::Allergen, dish::entities::Dish};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionSource {
    Description,
    Ingredient,
    Composite,
    /// Applied to every dish of a category, e.g. steak butters.
    HouseStep,
}

/// Evidence that a dish carries an excluded item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub text: String,
    pub source: MentionSource,
    /// Sub-ingredients responsible for a composite hit.
    pub contains: Vec<String>,
}

impl Mention {
    pub fn new(text: impl Into<String>, source: MentionSource) -> Self {
        Self {
            text: text.into(),
            source,
            contains: Vec::new(),
        }
    }

    pub fn composite(name: impl Into<String>, contains: Vec<String>) -> Self {
        Self {
            text: name.into(),
            source: MentionSource::Composite,
            contains,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EvaluateDishInput {
    pub dish_id: String,
    pub allergens: Vec<Allergen>,
    pub custom_exclusions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EvaluateInlineDishInput {
    pub dish: Dish,
    pub allergens: Vec<Allergen>,
    pub custom_exclusions: Vec<String>,
}
