use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    allergen::entities::Allergen,
    common::{entities::app_errors::CoreError, generate_timestamp},
    overrides::{
        entities::{OverrideLookup, OverrideMode, OverrideRecord, OverrideRow, OverrideStats},
        ports::{OverrideSource, OverrideStore},
        static_rules::{StaticOverrideTable, dish_key},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum OverrideEntry {
    Record(OverrideRecord),
    Unverified,
}

#[derive(Debug, Clone)]
enum SnapshotState {
    NotLoaded,
    Loaded {
        entries: HashMap<(String, Allergen), OverrideEntry>,
        loaded_at: DateTime<Utc>,
    },
}

/// Immutable view of the override table.
///
/// A snapshot that was never loaded answers from the static rule table and
/// reports itself as not live, so the evaluator falls back to automatic
/// detection for dishes the static table does not know.
#[derive(Debug, Clone)]
pub struct OverrideSnapshot {
    state: SnapshotState,
    fallback: StaticOverrideTable,
}

impl OverrideSnapshot {
    pub fn not_loaded(fallback: StaticOverrideTable) -> Self {
        Self {
            state: SnapshotState::NotLoaded,
            fallback,
        }
    }

    pub async fn load<S: OverrideSource>(
        source: &S,
        fallback: StaticOverrideTable,
    ) -> Result<Self, CoreError> {
        let rows = source.load_records().await.map_err(|e| {
            tracing::error!("Failed to load override rows: {}", e);
            e
        })?;

        Ok(Self::from_rows(rows, fallback))
    }

    pub fn from_rows(rows: Vec<OverrideRow>, fallback: StaticOverrideTable) -> Self {
        let mut entries: HashMap<(String, Allergen), OverrideEntry> = HashMap::new();

        for row in rows {
            let allergen = match row.allergen.parse::<Allergen>() {
                Ok(allergen) => allergen,
                Err(e) => {
                    warn!("Skipping override row for '{}': {}", row.dish_id, e);
                    continue;
                }
            };

            let entry = match row.can_be_modified {
                Some(can_be_modified) => {
                    OverrideEntry::Record(OverrideRecord::new(row.modifications, can_be_modified))
                }
                None => OverrideEntry::Unverified,
            };

            let key = (dish_key(&row.dish_id), allergen);
            if entries.insert(key, entry).is_some() {
                warn!(
                    "Duplicate override row for '{}' ({}), keeping the last one",
                    row.dish_id,
                    allergen.id()
                );
            }
        }

        info!("Loaded {} override records", entries.len());

        Self {
            state: SnapshotState::Loaded {
                entries,
                loaded_at: generate_timestamp(),
            },
            fallback,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SnapshotState::Loaded { .. })
    }

    pub fn mode(&self) -> OverrideMode {
        if self.is_loaded() {
            OverrideMode::Live
        } else {
            OverrideMode::StaticFallback
        }
    }
}

impl OverrideStore for OverrideSnapshot {
    fn lookup(&self, dish_id: &str, allergen: Allergen) -> OverrideLookup {
        match &self.state {
            SnapshotState::NotLoaded => self
                .fallback
                .get(dish_id, allergen)
                .cloned()
                .map(OverrideLookup::Record)
                .unwrap_or(OverrideLookup::NotFound),
            SnapshotState::Loaded { entries, .. } => {
                match entries.get(&(dish_key(dish_id), allergen)) {
                    Some(OverrideEntry::Record(record)) => OverrideLookup::Record(record.clone()),
                    Some(OverrideEntry::Unverified) => OverrideLookup::Unverified,
                    None => OverrideLookup::NotFound,
                }
            }
        }
    }

    fn is_live(&self) -> bool {
        self.is_loaded()
    }

    fn stats(&self) -> OverrideStats {
        match &self.state {
            SnapshotState::NotLoaded => OverrideStats {
                mode: self.mode(),
                loaded_at: None,
                records_by_allergen: Allergen::ALL
                    .into_iter()
                    .map(|a| (a, self.fallback.count_by_allergen(a)))
                    .filter(|(_, count)| *count > 0)
                    .collect(),
                unverified: 0,
            },
            SnapshotState::Loaded { entries, loaded_at } => {
                let mut records_by_allergen: BTreeMap<Allergen, usize> = BTreeMap::new();
                let mut unverified = 0;
                for ((_, allergen), entry) in entries {
                    match entry {
                        OverrideEntry::Record(_) => {
                            *records_by_allergen.entry(*allergen).or_default() += 1
                        }
                        OverrideEntry::Unverified => unverified += 1,
                    }
                }

                OverrideStats {
                    mode: self.mode(),
                    loaded_at: Some(*loaded_at),
                    records_by_allergen,
                    unverified,
                }
            }
        }
    }
}
