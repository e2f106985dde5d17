use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{
    common::entities::app_errors::CoreError,
    overrides::{entities::OverrideRow, ports::OverrideSource},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OverrideFile {
    Rows(Vec<OverrideRow>),
    Wrapped { records: Vec<OverrideRow> },
}

/// Reads the manually maintained override table from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileOverrideSource {
    pub path: PathBuf,
}

impl JsonFileOverrideSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Result<Vec<OverrideRow>, CoreError> {
        let file: OverrideFile = serde_json::from_str(content).map_err(|e| {
            error!("Failed to parse override records: {}", e);
            CoreError::OverrideSource(e.to_string())
        })?;

        Ok(match file {
            OverrideFile::Rows(rows) | OverrideFile::Wrapped { records: rows } => rows,
        })
    }
}

impl OverrideSource for JsonFileOverrideSource {
    async fn load_records(&self) -> Result<Vec<OverrideRow>, CoreError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            error!("Failed to read overrides {}: {}", self.path.display(), e);
            CoreError::OverrideSource(e.to_string())
        })?;

        let rows = Self::parse(&content)?;
        info!("Read {} override rows from {}", rows.len(), self.path.display());

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::{
        allergen::entities::Allergen,
        overrides::{
            entities::OverrideLookup,
            ports::OverrideStore,
            snapshot::OverrideSnapshot,
            static_rules::StaticOverrideTable,
        },
    };

    #[test]
    fn test_parse_accepts_wrapped_and_bare_rows() {
        let row = r#"{
            "dish_id": "filet",
            "allergen": "dairy",
            "modifications": ["NO steak butter"],
            "can_be_modified": true
        }"#;

        let wrapped =
            JsonFileOverrideSource::parse(&format!(r#"{{"records": [{}]}}"#, row)).unwrap();
        let bare = JsonFileOverrideSource::parse(&format!("[{}]", row)).unwrap();

        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0].modifications, vec!["NO steak butter"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            JsonFileOverrideSource::parse("[{\"dish_id\": 3}]"),
            Err(CoreError::OverrideSource(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "dish_id": "filet",
                    "allergen": "dairy",
                    "modifications": ["NO steak butter"],
                    "can_be_modified": true
                }},
                {{"dish_id": "crab_cakes", "allergen": "egg"}}
            ]"#
        )
        .unwrap();
        let source = JsonFileOverrideSource::new(file.path());

        let snapshot = OverrideSnapshot::load(&source, StaticOverrideTable::default())
            .await
            .unwrap();

        assert!(snapshot.is_live());
        assert!(matches!(
            snapshot.lookup("filet", Allergen::Dairy),
            OverrideLookup::Record(_)
        ));
        assert_eq!(
            snapshot.lookup("crab_cakes", Allergen::Egg),
            OverrideLookup::Unverified
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_a_source_error() {
        let source = JsonFileOverrideSource::new("/nonexistent/overrides.json");

        assert!(matches!(
            source.load_records().await,
            Err(CoreError::OverrideSource(_))
        ));
    }
}
