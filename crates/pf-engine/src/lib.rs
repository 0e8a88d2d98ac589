//! # pf-engine
//!
//! Prompt generation pipeline for Promptforge.
//!
//! A request names a domain and describes a task. The engine:
//! 1. resolves the domain adapter and the schema entry (latest or pinned)
//! 2. renders the entry's template with the request and adapter defaults, or
//!    in AI mode asks an LLM provider for the document
//! 3. validates the document and runs the bounded repair loop
//! 4. appends a generation record to the caller's history
//!
//! ## Architecture
//!
//! Built-in domains are a static [`AdapterTable`]; plugin domains are added
//! with [`AdapterTable::register_plugin`] before the table is handed to the
//! [`Engine`]. History and the persistence store are owned by the caller and
//! passed in explicitly.

pub mod adapters;
mod ai;
pub mod autosave;
mod engine;
mod error;
mod input;

pub use adapters::{AdapterTable, DomainAdapter};
pub use engine::{BUILTIN_SCHEMA_VERSION, Engine, validate_prompt};
pub use error::EngineError;
pub use input::{GeneratedPrompt, GenerationMeta, PromptInput};
