use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::allergen::entities::Allergen;

/// Explicitly authored verdict for one (dish, allergen) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OverrideRecord {
    pub instructions: Vec<String>,
    pub can_be_modified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    NoChanges,
    Instructions,
    NotModifiable,
}

impl OverrideRecord {
    pub fn new<I, S>(instructions: I, can_be_modified: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instructions: instructions.into_iter().map(Into::into).collect(),
            can_be_modified,
        }
    }

    pub fn kind(&self) -> OverrideKind {
        match (self.can_be_modified, self.instructions.is_empty()) {
            (false, _) => OverrideKind::NotModifiable,
            (true, true) => OverrideKind::NoChanges,
            (true, false) => OverrideKind::Instructions,
        }
    }
}

/// Result of asking the override store about a (dish, allergen) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideLookup {
    Record(OverrideRecord),
    /// A row exists but nobody confirmed whether the dish can be modified.
    Unverified,
    NotFound,
}

/// Raw row as stored by an override source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRow {
    pub dish_id: String,
    pub allergen: String,
    #[serde(default)]
    pub modifications: Vec<String>,
    #[serde(default)]
    pub can_be_modified: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    Live,
    StaticFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OverrideStats {
    pub mode: OverrideMode,
    pub loaded_at: Option<DateTime<Utc>>,
    pub records_by_allergen: BTreeMap<Allergen, usize>,
    pub unverified: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_kinds() {
        assert_eq!(
            OverrideRecord::new(Vec::<String>::new(), true).kind(),
            OverrideKind::NoChanges
        );
        assert_eq!(
            OverrideRecord::new(["NO steak butter"], true).kind(),
            OverrideKind::Instructions
        );
        assert_eq!(
            OverrideRecord::new(["NO cheese"], false).kind(),
            OverrideKind::NotModifiable
        );
    }

    #[test]
    fn test_row_defaults_missing_fields() {
        let row: OverrideRow =
            serde_json::from_str(r#"{"dish_id": "key_lime_pie", "allergen": "dairy"}"#).unwrap();

        assert!(row.modifications.is_empty());
        assert_eq!(row.can_be_modified, None);
    }
}
