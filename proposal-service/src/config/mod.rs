use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ProposalConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl ProposalConfig {
    pub fn load() -> Result<Self, AppError> {
        // Loads .env and APP__* variables for the shared settings.
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ProposalConfig {
            common: common_config,
            mongodb: MongoConfig {
                // MONGO_URL is the name older deployments set.
                uri: get_env_any(
                    &["MONGODB_URI", "MONGO_URL"],
                    Some("mongodb://localhost:27017"),
                    is_prod,
                )?,
                database: get_env("MONGODB_DATABASE", Some("proposal_db"), is_prod)?,
            },
            store: StoreConfig {
                backend: env::var("STORE_BACKEND")
                    .unwrap_or_else(|_| "mongodb".to_string())
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    get_env_any(&[key], default, is_prod)
}

/// First of `keys` that is set, else the default outside production.
fn get_env_any(keys: &[&str], default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    resolve_env(keys, default, is_prod, |key| env::var(key).ok())
}

fn resolve_env(
    keys: &[&str],
    default: Option<&str>,
    is_prod: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, AppError> {
    if let Some(val) = keys.iter().find_map(|&key| lookup(key)) {
        return Ok(val);
    }

    let names = keys.join(" or ");
    if is_prod {
        Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            names
        )))
    } else if let Some(def) = default {
        Ok(def.to_string())
    } else {
        Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            names
        )))
    }
}
