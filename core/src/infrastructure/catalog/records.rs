use serde::Deserialize;
use serde_json::Value;

/// A contains-column as exported from the menu spreadsheet: `"Y"`, `"N"`,
/// an empty cell, `null` or a plain boolean. Anything else (numbers,
/// objects) is kept so one odd cell does not reject the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Text(String),
    Other(Value),
}

/// One menu row in the catalog export. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItemRecord {
    pub id: String,
    pub dish_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub contains_dairy: Option<RawFlag>,
    #[serde(default)]
    pub contains_egg: Option<RawFlag>,
    #[serde(default)]
    pub contains_gluten: Option<RawFlag>,
    #[serde(default)]
    pub contains_shellfish: Option<RawFlag>,
    #[serde(default)]
    pub contains_fish: Option<RawFlag>,
    #[serde(default)]
    pub contains_soy: Option<RawFlag>,
    #[serde(default)]
    pub contains_nuts: Option<RawFlag>,
    #[serde(default)]
    pub contains_sesame: Option<RawFlag>,
    #[serde(default)]
    pub contains_msg: Option<RawFlag>,
    #[serde(default)]
    pub contains_peanuts: Option<RawFlag>,
    #[serde(default)]
    pub contains_tree_nuts: Option<RawFlag>,
    #[serde(default)]
    pub cannot_be_made_safe_notes: Option<String>,
}

/// The export is either a bare array or wrapped in `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogFile {
    Items(Vec<MenuItemRecord>),
    Wrapped { items: Vec<MenuItemRecord> },
}

impl CatalogFile {
    pub fn into_items(self) -> Vec<MenuItemRecord> {
        match self {
            CatalogFile::Items(items) | CatalogFile::Wrapped { items } => items,
        }
    }
}
