//! Configuration loading for the batch runner.

use std::fs;
use std::path::{Path, PathBuf};

use graphmill_domain::ClassDefinition;
use serde::Deserialize;

use crate::error::{CliError, Result};

fn default_chunk_size() -> usize {
    1024
}

fn default_fallback_label() -> String {
    graphmill_domain::DEFAULT_LABEL.to_string()
}

/// Application configuration, read from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Completion API settings.
    pub api: ApiConfig,

    /// Input and output locations.
    pub paths: PathsConfig,

    /// Optional graph store; when absent, results only go to JSON files.
    #[serde(default)]
    pub neo4j: Option<Neo4jConfig>,

    /// Contextual topic inlined into the extraction prompts.
    #[serde(default)]
    pub context: Option<String>,

    /// Maximum chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Label for entities synthesized from unresolved relation endpoints.
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,

    /// Class definitions constraining the entity stage.
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,

    /// Pause between documents, in milliseconds.
    #[serde(default)]
    pub inter_document_delay_ms: u64,

    /// Clear the graph store before the first document.
    #[serde(default)]
    pub clear_on_start: bool,
}

/// Completion API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// OpenAI-compatible endpoint base, e.g. `https://api.deepseek.com/v1`.
    pub base_url: String,

    /// Model name passed with every request.
    pub model: String,

    /// One credential per pool slot; the pool size is also the
    /// concurrency ceiling.
    pub api_keys: Vec<String>,
}

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Cleaned input file (a JSON array of typed text fragments).
    pub input: PathBuf,

    /// Directory failed chunks are parked in.
    pub error_dir: PathBuf,

    /// Directory per-document JSON results are written to.
    pub output_dir: PathBuf,
}

/// Graph store connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Bolt URI, e.g. `neo4j://localhost:7687`.
    pub uri: String,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
}

impl AppConfig {
    /// Loads and validates the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the runner cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CliError::Config("api.base_url is not set".into()));
        }
        if self.api.model.trim().is_empty() {
            return Err(CliError::Config("api.model is not set".into()));
        }
        if self.api.api_keys.is_empty() {
            return Err(CliError::Config("api.api_keys must list at least one key".into()));
        }
        if self.chunk_size == 0 {
            return Err(CliError::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }

    /// The graph store settings, or an error for commands that need them.
    pub fn require_neo4j(&self) -> Result<&Neo4jConfig> {
        self.neo4j
            .as_ref()
            .ok_or_else(|| CliError::Config("the [neo4j] section is not set".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [api]
        base_url = "https://api.example.com/v1"
        model = "some-model"
        api_keys = ["k1", "k2"]

        [paths]
        input = "data/cleaned.json"
        error_dir = "errors"
        output_dir = "output"
    "#;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();
        config.validate().unwrap();
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.fallback_label, "Entity");
        assert_eq!(config.inter_document_delay_ms, 0);
        assert!(!config.clear_on_start);
        assert!(config.neo4j.is_none());
        assert!(config.classes.is_empty());
    }

    #[test]
    fn full_config_parses() {
        let full = format!(
            r#"
            context = "university finance policy"
            chunk_size = 2048
            fallback_label = "Thing"
            inter_document_delay_ms = 500
            clear_on_start = true
            {MINIMAL}
            [neo4j]
            uri = "neo4j://localhost:7687"
            user = "neo4j"
            password = "secret"

            [[classes]]
            class_label = "Person"
            expected_properties = [{{ name = "age", type = "int" }}]
        "#
        );
        let config: AppConfig = toml::from_str(&full).unwrap();
        config.validate().unwrap();
        assert_eq!(config.chunk_size, 2048);
        assert_eq!(config.classes.len(), 1);
        assert_eq!(config.classes[0].class_label, "Person");
        assert!(config.require_neo4j().is_ok());
    }

    #[test]
    fn missing_api_keys_are_rejected() {
        let bad = MINIMAL.replace(r#"["k1", "k2"]"#, "[]");
        let config: AppConfig = toml::from_str(&bad).unwrap();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_neo4j_section_fails_commands_that_need_it() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();
        assert!(config.require_neo4j().is_err());
    }
}
