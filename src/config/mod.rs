pub mod settings;

use crate::core::ProfessionType;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Root of the REST API, e.g. `http://localhost:3000/api`.
    pub api_base_url: String,
    /// Path between the API root and the profession segment.
    pub api_domain: String,
    pub profession: ProfessionType,
    /// Quiet period after the last search/location keystroke before refetching.
    pub debounce_ms: u64,
    /// Size of the preview shown while no category is selected.
    pub preview_limit: usize,
    pub page_limit: u32,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config = settings::load_config(None)?;
        settings::apply_env_overrides(&mut config);
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            api_domain: "art-creation".to_string(),
            profession: ProfessionType::Artisanat,
            debounce_ms: 500,
            preview_limit: 6,
            page_limit: 50,
            request_timeout_secs: 15,
        }
    }
}
