//! Generation pipeline settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound accepted for `max_repair_attempts`.
pub const MAX_REPAIR_ATTEMPTS_CEILING: u32 = 10;

const fn default_true() -> bool {
    true
}

const fn default_max_repair_attempts() -> u32 {
    3
}

const fn default_history_limit() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Run the repair loop when a rendered document fails validation.
    #[serde(default = "default_true")]
    pub auto_repair: bool,

    /// Maximum number of repair passes per generation.
    #[serde(default = "default_max_repair_attempts")]
    pub max_repair_attempts: u32,

    /// Number of generation records kept in history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Fail the generation when the final document is still invalid.
    #[serde(default)]
    pub strict: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            auto_repair: true,
            max_repair_attempts: default_max_repair_attempts(),
            history_limit: default_history_limit(),
            strict: false,
        }
    }
}

impl GenerationConfig {
    /// Reject values the pipeline cannot honor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero history limit or a repair
    /// bound above [`MAX_REPAIR_ATTEMPTS_CEILING`].
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.history_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.max_repair_attempts > MAX_REPAIR_ATTEMPTS_CEILING {
            return Err(ConfigError::InvalidValue {
                field: "generation.max_repair_attempts".into(),
                reason: format!("must be at most {MAX_REPAIR_ATTEMPTS_CEILING}"),
            });
        }
        Ok(())
    }
}
