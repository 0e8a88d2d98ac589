//! # pf-config
//!
//! Layered configuration loading for Promptforge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PROMPTFORGE_*` prefix, `__` as separator)
//! 2. Project-level `.promptforge/config.toml`
//! 3. User-level `~/.config/promptforge/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PROMPTFORGE_PROVIDER__API_KEY` -> `provider.api_key`,
//! `PROMPTFORGE_GENERATION__STRICT` -> `generation.strict`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pf_config::ForgeConfig;
//!
//! let config = ForgeConfig::load_with_dotenv().expect("config");
//! if config.provider.is_configured() {
//!     println!("model: {}", config.provider.effective_model());
//! }
//! ```

mod error;
mod generation;
mod provider;
mod storage;

pub use error::ConfigError;
pub use generation::{GenerationConfig, MAX_REPAIR_ATTEMPTS_CEILING};
pub use provider::{ProviderConfig, ProviderKind};
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ForgeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is out of
    /// range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and range-check a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.generation.check()?;
        Ok(config)
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain with the project layer read from
    /// `<project_root>/.promptforge/config.toml`.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".promptforge").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PROMPTFORGE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("promptforge").join("config.toml"))
    }
}
