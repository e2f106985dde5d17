use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Dairy,
    Egg,
    Gluten,
    Shellfish,
    Fish,
    Soy,
    #[serde(rename = "peanuts")]
    Peanut,
    #[serde(rename = "tree_nuts")]
    TreeNut,
    Sesame,
    Msg,
    OnionGarlic,
    Tomato,
    Seed,
}

impl Allergen {
    pub const ALL: [Allergen; 13] = [
        Allergen::Dairy,
        Allergen::Egg,
        Allergen::Gluten,
        Allergen::Shellfish,
        Allergen::Fish,
        Allergen::Soy,
        Allergen::Peanut,
        Allergen::TreeNut,
        Allergen::Sesame,
        Allergen::Msg,
        Allergen::OnionGarlic,
        Allergen::Tomato,
        Allergen::Seed,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Allergen::Dairy => "dairy",
            Allergen::Egg => "egg",
            Allergen::Gluten => "gluten",
            Allergen::Shellfish => "shellfish",
            Allergen::Fish => "fish",
            Allergen::Soy => "soy",
            Allergen::Peanut => "peanuts",
            Allergen::TreeNut => "tree_nuts",
            Allergen::Sesame => "sesame",
            Allergen::Msg => "msg",
            Allergen::OnionGarlic => "onion_garlic",
            Allergen::Tomato => "tomato",
            Allergen::Seed => "seed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Allergen::Dairy => "Dairy",
            Allergen::Egg => "Egg",
            Allergen::Gluten => "Gluten",
            Allergen::Shellfish => "Shellfish",
            Allergen::Fish => "Fish",
            Allergen::Soy => "Soy",
            Allergen::Peanut => "Peanuts",
            Allergen::TreeNut => "Tree Nuts",
            Allergen::Sesame => "Sesame",
            Allergen::Msg => "MSG",
            Allergen::OnionGarlic => "Onion/Garlic",
            Allergen::Tomato => "Tomato",
            Allergen::Seed => "Seed",
        }
    }

    /// Whether the menu catalog carries a contains-flag for this allergen.
    /// The others are only ever detected from text.
    pub fn has_catalog_flag(&self) -> bool {
        !matches!(
            self,
            Allergen::OnionGarlic | Allergen::Tomato | Allergen::Seed
        )
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Allergen {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");

        match key.as_str() {
            "dairy" | "milk" => Ok(Allergen::Dairy),
            "egg" | "eggs" => Ok(Allergen::Egg),
            "gluten" | "wheat" => Ok(Allergen::Gluten),
            "shellfish" => Ok(Allergen::Shellfish),
            "fish" => Ok(Allergen::Fish),
            "soy" => Ok(Allergen::Soy),
            "peanut" | "peanuts" => Ok(Allergen::Peanut),
            "tree_nut" | "tree_nuts" | "nuts" => Ok(Allergen::TreeNut),
            "sesame" => Ok(Allergen::Sesame),
            "msg" => Ok(Allergen::Msg),
            "onion_garlic" | "onion" | "garlic" => Ok(Allergen::OnionGarlic),
            "tomato" | "tomatoes" => Ok(Allergen::Tomato),
            "seed" | "seeds" => Ok(Allergen::Seed),
            _ => Err(CoreError::UnknownAllergen(s.to_string())),
        }
    }
}

/// Catalog contains-flag. `Unspecified` is never read as `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AllergenFlag {
    Present,
    Absent,
    #[default]
    Unspecified,
}

impl AllergenFlag {
    pub fn is_present(&self) -> bool {
        matches!(self, AllergenFlag::Present)
    }
}
