use std::path::PathBuf;

use allergen_guard_core::domain::common::{
    CatalogConfig, GuardConfig, OverrideConfig, ReviewConfig,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "allergen-guard", version, about = "Allergen safety API for restaurant menus")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        num_args = 0..
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DataArgs {
    #[arg(long = "catalog-path", env = "CATALOG_PATH", default_value = "data/menu.json")]
    pub catalog_path: PathBuf,

    /// Without an override table the engine answers from the static rules.
    #[arg(long = "overrides-path", env = "OVERRIDES_PATH")]
    pub overrides_path: Option<PathBuf>,

    #[arg(
        long = "review-categories",
        env = "REVIEW_CATEGORIES",
        value_delimiter = ',',
        default_value = "Seafood,Chicken"
    )]
    pub review_categories: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for GuardConfig {
    fn from(args: Args) -> Self {
        Self {
            catalog: CatalogConfig {
                path: args.data.catalog_path,
            },
            overrides: OverrideConfig {
                path: args.data.overrides_path,
            },
            review: ReviewConfig {
                categories: args
                    .data
                    .review_categories
                    .into_iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_convert_to_guard_config() {
        let args = Args::parse_from(["allergen-guard"]);

        let config = GuardConfig::from(args.clone());

        assert_eq!(args.server.port, 3333);
        assert_eq!(config.catalog.path, PathBuf::from("data/menu.json"));
        assert_eq!(config.overrides.path, None);
        assert_eq!(config.review.categories, vec!["Seafood", "Chicken"]);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "allergen-guard",
            "--overrides-path",
            "/data/overrides.json",
            "--review-categories",
            "Seafood, ,Steaks",
            "--allowed-origins",
            "http://localhost:5173,https://pos.example.com",
        ]);

        let origins = args.server.allowed_origins.clone();
        let config = GuardConfig::from(args);

        assert_eq!(origins.len(), 2);
        assert_eq!(
            config.overrides.path,
            Some(PathBuf::from("/data/overrides.json"))
        );
        assert_eq!(config.review.categories, vec!["Seafood", "Steaks"]);
    }
}
