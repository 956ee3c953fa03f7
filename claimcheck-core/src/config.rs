use std::sync::Arc;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::error::ClaimCheckError;
use crate::reference::{CriteriaCatalog, GuidelineCatalog};

#[derive(Debug, Deserialize, Clone)]
pub struct ClaimCheckConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub socket_path: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// Optional overrides for the compiled-in reference data.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReferenceConfig {
    pub guideline_catalog: Option<String>,
    pub criteria_catalog: Option<String>,
}

impl ReferenceConfig {
    /// Load the guideline catalog, falling back to the built-in data when no path is set.
    pub fn guideline_catalog(&self) -> Result<Arc<GuidelineCatalog>, ClaimCheckError> {
        match &self.guideline_catalog {
            Some(path) => {
                tracing::info!("Loading guideline catalog from {}", path);
                GuidelineCatalog::from_json_file(path).map(Arc::new)
            }
            None => Ok(GuidelineCatalog::shared()),
        }
    }

    /// Load the criteria catalog, falling back to the built-in data when no path is set.
    pub fn criteria_catalog(&self) -> Result<Arc<CriteriaCatalog>, ClaimCheckError> {
        match &self.criteria_catalog {
            Some(path) => {
                tracing::info!("Loading criteria catalog from {}", path);
                CriteriaCatalog::from_json_file(path).map(Arc::new)
            }
            None => Ok(CriteriaCatalog::shared()),
        }
    }
}

impl ClaimCheckConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}
