use std::path::PathBuf;

use chrono::{DateTime, Utc};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct GuardConfig {
    pub catalog: CatalogConfig,
    pub overrides: OverrideConfig,
    pub review: ReviewConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

/// Where the override snapshot comes from. `None` runs the engine on the
/// built-in static rule table.
#[derive(Clone, Debug, Default)]
pub struct OverrideConfig {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ReviewConfig {
    pub categories: Vec<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            categories: vec!["Seafood".to_string(), "Chicken".to_string()],
        }
    }
}

impl ReviewConfig {
    pub fn needs_review(&self, category: &str) -> bool {
        let category = normalize_dish_name(category);
        self.categories
            .iter()
            .any(|c| normalize_dish_name(c) == category)
    }
}

pub fn generate_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Trims, collapses inner whitespace and lowercases a dish or category name.
pub fn normalize_dish_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}
