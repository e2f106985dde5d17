use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    allergen::entities::{Allergen, AllergenFlag},
    common::entities::app_errors::CoreError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergen_flags: BTreeMap<Allergen, AllergenFlag>,
    /// When non-empty, automatic analysis never offers a modification.
    #[serde(default)]
    pub cannot_be_made_safe_notes: String,
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            ingredients: Vec::new(),
            allergen_flags: BTreeMap::new(),
            cannot_be_made_safe_notes: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flag(mut self, allergen: Allergen, flag: AllergenFlag) -> Self {
        self.allergen_flags.insert(allergen, flag);
        self
    }

    pub fn with_cannot_be_made_safe_notes(mut self, notes: impl Into<String>) -> Self {
        self.cannot_be_made_safe_notes = notes.into();
        self
    }

    /// Catalog flag for the allergen. Text-only allergens are always
    /// `Unspecified`, whatever the record says.
    pub fn flag(&self, allergen: Allergen) -> AllergenFlag {
        if !allergen.has_catalog_flag() {
            return AllergenFlag::Unspecified;
        }
        self.allergen_flags
            .get(&allergen)
            .copied()
            .unwrap_or_default()
    }

    pub fn cannot_be_made_safe(&self) -> Option<&str> {
        let notes = self.cannot_be_made_safe_notes.trim();
        (!notes.is_empty()).then_some(notes)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::MalformedDish("dish id is empty".to_string()));
        }

        if self.name.trim().is_empty() {
            return Err(CoreError::MalformedDish(format!(
                "dish '{}' has no name",
                self.id
            )));
        }

        if let Some(position) = self.ingredients.iter().position(|i| i.trim().is_empty()) {
            return Err(CoreError::MalformedDish(format!(
                "dish '{}' has an empty ingredient at position {}",
                self.id, position
            )));
        }

        Ok(())
    }
}
