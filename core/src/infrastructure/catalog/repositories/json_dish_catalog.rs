use std::{collections::HashMap, path::Path, sync::Arc};

use tracing::{error, info, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        dish::{entities::Dish, ports::DishCatalog},
    },
    infrastructure::catalog::records::CatalogFile,
};

/// Menu catalog read once from a JSON export and served from memory.
#[derive(Debug, Clone, Default)]
pub struct JsonDishCatalog {
    dishes: Arc<Vec<Dish>>,
    index: Arc<HashMap<String, usize>>,
}

impl JsonDishCatalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, dish) in dishes.iter().enumerate() {
            if index.insert(catalog_key(&dish.id), position).is_some() {
                warn!("Duplicate catalog id '{}', keeping the last one", dish.id);
            }
        }

        Self {
            dishes: Arc::new(dishes),
            index: Arc::new(index),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            error!("Failed to read catalog {}: {}", path.display(), e);
            CoreError::Catalog(e.to_string())
        })?;

        let catalog = Self::from_json(&content)?;
        info!("Loaded {} dishes from {}", catalog.len(), path.display());

        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(content).map_err(|e| {
            error!("Failed to parse catalog: {}", e);
            CoreError::Catalog(e.to_string())
        })?;

        Ok(Self::new(
            file.into_items().into_iter().map(Dish::from).collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn catalog_key(dish_id: &str) -> String {
    dish_id.trim().to_lowercase()
}

impl DishCatalog for JsonDishCatalog {
    async fn get_dish(&self, dish_id: String) -> Result<Option<Dish>, CoreError> {
        let dish = self
            .index
            .get(&catalog_key(&dish_id))
            .and_then(|&position| self.dishes.get(position))
            .cloned();

        Ok(dish)
    }

    async fn list_dishes(&self) -> Result<Vec<Dish>, CoreError> {
        let mut positions: Vec<usize> = self.index.values().copied().collect();
        positions.sort_unstable();

        Ok(positions
            .into_iter()
            .filter_map(|p| self.dishes.get(p).cloned())
            .collect())
    }
}
