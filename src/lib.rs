//! Interactome Analyzer
//!
//! Path and centrality analysis for biological interaction networks:
//! - Metabolite blacklist and endpoint selection
//! - All shortest paths between every selected pair
//! - Per-pair and global path frequencies, grouped by entity type
//! - Ubiquitous node detection
//! - Component-parallel betweenness centrality on a bounded worker pool

pub mod graph;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

pub use graph::AnalysisConfig;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub analysis: AnalysisConfig,
}

// ============================================================================
// Config loading
// ============================================================================

impl AnalysisConfig {
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "analyzer.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults. The merged result is
    /// validated before it is returned.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let mut config = Self::load_yaml(yaml_path).analysis;

        // 2. Env var overrides
        if let Some(threshold) = env_parse("ANALYZER_UBIQUITY_THRESHOLD") {
            config.ubiquity_threshold = threshold;
        }
        if let Some(workers) = env_parse("ANALYZER_MAX_WORKERS") {
            config.max_workers = Some(workers);
        }
        if let Some(seed) = env_parse("ANALYZER_SEED") {
            config.seed = Some(seed);
        }
        if let Some(threshold) = env_parse("ANALYZER_LARGE_GRAPH_THRESHOLD") {
            config.large_graph_threshold = threshold;
        }
        if let Ok(value) = std::env::var("ANALYZER_DISABLE_BLACKLIST") {
            if matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes") {
                config.blacklist_enabled = false;
            }
        }

        // 3. Validate
        config.validate()?;
        Ok(config)
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("analyzer.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Parse an env var, ignoring it when unset or malformed.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring malformed {}={}", name, raw);
            None
        }
    }
}
