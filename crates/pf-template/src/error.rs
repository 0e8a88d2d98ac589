//! Template error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A JSON-mode template rendered to text that does not parse.
    #[error("rendered template is not valid JSON: {message}")]
    InvalidJson { message: String },

    /// An `{{#if}}` block was opened inside another one.
    #[error("nested conditional '{{{{#if {flag}}}}}' is not supported")]
    NestedConditional { flag: String },

    /// An `{{#if}}` without `{{/if}}`, or a stray `{{/if}}`.
    #[error("unbalanced conditional block: {0}")]
    UnbalancedConditional(String),

    /// A helper rejected its arguments.
    #[error("helper '{name}' failed: {message}")]
    Helper { name: String, message: String },
}
