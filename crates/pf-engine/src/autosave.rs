//! Last-input autosave on the persistence surface.

use pf_core::{CoreError, Store};

use crate::error::EngineError;
use crate::input::PromptInput;

/// Store key holding the most recent generation input.
pub const AUTOSAVE_KEY: &str = "autosave";

/// Persist `input` under [`AUTOSAVE_KEY`], replacing any earlier value.
///
/// # Errors
///
/// Returns `EngineError::Store` if serialization or the store fails.
pub fn save_autosave(store: &mut dyn Store, input: &PromptInput) -> Result<(), EngineError> {
    let raw = serde_json::to_string_pretty(input).map_err(CoreError::from)?;
    store.set(AUTOSAVE_KEY, &raw).map_err(CoreError::from)?;
    Ok(())
}

/// The autosaved input, if one exists.
///
/// # Errors
///
/// Returns `EngineError::Store` if the store fails or the saved value is not
/// a valid input.
pub fn load_autosave(store: &dyn Store) -> Result<Option<PromptInput>, EngineError> {
    let Some(raw) = store.get(AUTOSAVE_KEY).map_err(CoreError::from)? else {
        return Ok(None);
    };
    let input = serde_json::from_str(&raw).map_err(CoreError::from)?;
    Ok(Some(input))
}

/// Remove the autosaved input. Returns whether one existed.
///
/// # Errors
///
/// Returns `EngineError::Store` if the store fails.
pub fn clear_autosave(store: &mut dyn Store) -> Result<bool, EngineError> {
    Ok(store.delete(AUTOSAVE_KEY).map_err(CoreError::from)?)
}
