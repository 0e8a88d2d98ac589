//! # pf-template
//!
//! Template engine turning a small mustache-like syntax into JSON text.
//!
//! Rendering runs in three fixed stages:
//! 1. `{{#if flag}}...{{/if}}` conditional blocks
//! 2. `{{helper arg ...}}` named helper calls
//! 3. `{{path.to.value}}` variable interpolation
//!
//! Stages 2 and 3 share one scan over the text left by stage 1, with each tag
//! tried as a helper call before a path. Substituted values are never
//! rescanned, so they cannot form new tags.
//!
//! Unresolved variables and unknown helpers are left in the output verbatim.
//! Templates whose first character after whitespace and leading
//! `{{#if}}`/`{{/if}}` tags is `{` or `[` (not opening a tag) are in JSON
//! mode: string values are JSON-escaped and the rendered text must parse.

mod context;
mod engine;
mod error;
pub mod helpers;
mod path;
mod sanitize;

pub use context::TemplateContext;
pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use helpers::{Helper, Rendered};
pub use sanitize::strip_template_syntax;
