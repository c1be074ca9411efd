//! Sampling configuration from TOML (`[generation]` section)

use chef_domain::GenerationParams;
use serde::{Deserialize, Serialize};

/// Raw generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            model: params.model,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

impl FileGenerationConfig {
    /// Convert to the domain parameters sent with every request
    pub fn to_params(&self) -> GenerationParams {
        GenerationParams::new(self.model.trim())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}
