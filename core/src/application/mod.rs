use tracing::{error, info, warn};

use crate::{
    domain::{
        common::{GuardConfig, entities::app_errors::CoreError, services::Service},
        overrides::{snapshot::OverrideSnapshot, static_rules::StaticOverrideTable},
        safety::{knowledge::SafetyKnowledge, services::SafetyEvaluator},
    },
    infrastructure::{
        catalog::repositories::json_dish_catalog::JsonDishCatalog,
        overrides::repositories::json_override_source::JsonFileOverrideSource,
    },
};

pub type AllergenGuardService = Service<JsonDishCatalog, OverrideSnapshot>;

pub async fn create_service(config: GuardConfig) -> Result<AllergenGuardService, CoreError> {
    let knowledge = SafetyKnowledge::builtin()?;
    let dish_catalog = JsonDishCatalog::load(&config.catalog.path).await?;
    let overrides = load_overrides(&config).await;

    info!(
        "Allergen guard ready: {} dishes, overrides {:?}",
        dish_catalog.len(),
        overrides.mode()
    );

    Ok(Service::new(
        dish_catalog,
        SafetyEvaluator::new(knowledge, overrides, config.review),
    ))
}

async fn load_overrides(config: &GuardConfig) -> OverrideSnapshot {
    let Some(path) = &config.overrides.path else {
        warn!("No override table configured, using the static rule table");
        return OverrideSnapshot::not_loaded(StaticOverrideTable::builtin());
    };

    let source = JsonFileOverrideSource::new(path);
    match OverrideSnapshot::load(&source, StaticOverrideTable::builtin()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(
                "Override table {} unavailable, using the static rule table: {}",
                path.display(),
                e
            );
            OverrideSnapshot::not_loaded(StaticOverrideTable::builtin())
        }
    }
}
