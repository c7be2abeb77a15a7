//! TOML configuration. Every section and field is optional.
//!
//! ```toml
//! [extractor]
//! endpoint = "http://localhost:3000/api/workflow"
//! timeout_secs = 30
//!
//! [registry]
//! endpoint = "http://localhost:3000/api/node-types"
//! fallback = "builtin"
//!
//! [layout]
//! origin_x = 100.0
//! origin_y = 100.0
//! spacing = 150.0
//!
//! [construction]
//! default_condition = "Success"
//! dependency_policy = "first-parent"
//! ```

use crate::construction::{ColumnLayout, DEFAULT_CONDITION, DependencyPolicy, GraphConstructor};
use crate::error::{ConfigError, ExtractionError};
use crate::extract::HttpStepExtractor;
use crate::registry::{FallbackPolicy, HttpNodeTypeSource};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

pub const DEFAULT_EXTRACTOR_ENDPOINT: &str = "http://localhost:3000/api/workflow";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepflowConfig {
    pub extractor: ExtractorConfig,
    pub registry: RegistryConfig,
    pub layout: ColumnLayout,
    pub construction: ConstructionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EXTRACTOR_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Without an `endpoint`, the registry serves the compiled-in types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub endpoint: Option<String>,
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    pub default_condition: String,
    pub dependency_policy: DependencyPolicy,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            default_condition: DEFAULT_CONDITION.to_string(),
            dependency_policy: DependencyPolicy::default(),
        }
    }
}

impl StepflowConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path, "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn constructor(&self) -> GraphConstructor {
        GraphConstructor::builder()
            .with_layout(self.layout)
            .with_dependency_policy(self.construction.dependency_policy)
            .with_default_condition(&self.construction.default_condition)
            .build()
    }

    pub fn extractor(&self) -> Result<HttpStepExtractor, ExtractionError> {
        HttpStepExtractor::with_timeout(
            &self.extractor.endpoint,
            Duration::from_secs(self.extractor.timeout_secs),
        )
    }

    pub fn node_type_source(&self) -> Option<HttpNodeTypeSource> {
        self.registry.endpoint.as_deref().map(HttpNodeTypeSource::new)
    }
}
