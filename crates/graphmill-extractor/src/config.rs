//! Pipeline configuration.

use graphmill_domain::ClassDefinition;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Default chunk budget in bytes.
pub const DEFAULT_CHUNK_BUDGET: usize = 1024;

/// Settings that shape how a document is chunked and prompted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum byte length of a chunk handed to the completion backend.
    pub chunk_budget: usize,
    /// Optional domain context inlined into both extraction prompts.
    pub context: Option<String>,
    /// Class definitions guiding the entity stage.
    pub classes: Vec<ClassDefinition>,
    /// Label assigned to entities synthesized for unresolved
    /// relation endpoints during merging.
    pub fallback_label: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_budget: DEFAULT_CHUNK_BUDGET,
            context: None,
            classes: Vec::new(),
            fallback_label: graphmill_domain::DEFAULT_LABEL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Checks the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_budget == 0 {
            return Err(PipelineError::InvalidChunkBudget(self.chunk_budget));
        }
        if self.fallback_label.trim().is_empty() {
            return Err(PipelineError::Config(
                "fallback_label must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let config = PipelineConfig {
            chunk_budget: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidChunkBudget(0))
        ));
    }

    #[test]
    fn blank_fallback_label_is_rejected() {
        let config = PipelineConfig {
            fallback_label: "  ".to_string(),
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }
}
