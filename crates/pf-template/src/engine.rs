//! Three-stage template renderer.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

use crate::context::TemplateContext;
use crate::error::TemplateError;
use crate::helpers::{self, Helper, Rendered};
use crate::path::{PATH_RE, escape_json, is_truthy, render_value, resolve, root_of};

/// `{{#if flag}}` (group 1 = flag) or `{{/if}}`.
static CONDITIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(?:#if\s+([^{}\s]+)|/if)\s*\}\}").expect("conditional regex should compile")
});

/// Any `{{ ... }}` tag without nested braces (group 1 = trimmed body).
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").expect("tag regex should compile"));

/// A parsed helper argument.
#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Literal(Value),
    Path(String),
}

/// Renders templates against a [`TemplateContext`].
///
/// Holds the helper table; cheap to clone and shareable across threads.
#[derive(Clone)]
pub struct TemplateEngine {
    helpers: BTreeMap<String, Arc<dyn Helper>>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// An engine with the built-in helpers: `json`, `default`, `join`,
    /// `capitalize`, `formatDate`.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self::without_helpers();
        engine.register_helper("json", helpers::json);
        engine.register_helper("default", helpers::default);
        engine.register_helper("join", helpers::join);
        engine.register_helper("capitalize", helpers::capitalize);
        engine.register_helper("formatDate", helpers::format_date);
        engine
    }

    /// An engine with no helpers registered.
    #[must_use]
    pub fn without_helpers() -> Self {
        Self {
            helpers: BTreeMap::new(),
        }
    }

    /// Register (or replace) a helper under `name`.
    pub fn register_helper(&mut self, name: impl Into<String>, helper: impl Helper + 'static) {
        self.helpers.insert(name.into(), Arc::new(helper));
    }

    #[must_use]
    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Registered helper names, sorted.
    #[must_use]
    pub fn helper_names(&self) -> Vec<&str> {
        self.helpers.keys().map(String::as_str).collect()
    }

    /// Render `template` with `context`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` for unbalanced or nested conditionals, helper
    /// failures, or (in JSON mode) output that does not parse as JSON.
    pub fn compile(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let scope = context.merged();
        let json_mode = is_json_template(template);

        let text = resolve_conditionals(template, &scope)?;
        let text = self.resolve_tags(&text, &scope, json_mode)?;

        if json_mode && let Err(error) = serde_json::from_str::<Value>(&text) {
            tracing::debug!(%error, "rendered template failed to parse");
            return Err(TemplateError::InvalidJson {
                message: error.to_string(),
            });
        }
        Ok(text)
    }

    /// Render `template` and parse the result as JSON.
    ///
    /// # Errors
    ///
    /// As [`Self::compile`], plus `InvalidJson` when a non-JSON-mode template
    /// does not render to JSON.
    pub fn render_value(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<Value, TemplateError> {
        let text = self.compile(template, context)?;
        serde_json::from_str(&text).map_err(|e| TemplateError::InvalidJson {
            message: e.to_string(),
        })
    }

    /// Root variable names referenced anywhere in `template`, excluding helper
    /// names and literals.
    #[must_use]
    pub fn extract_variables(&self, template: &str) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for caps in TAG_RE.captures_iter(template) {
            let body = &caps[1];
            if let Some(flag) = body.strip_prefix("#if") {
                let flag = flag.trim();
                if PATH_RE.is_match(flag) {
                    names.insert(root_of(flag).to_string());
                }
                continue;
            }
            if body.starts_with('/') {
                continue;
            }
            let Some(words) = split_words(body) else {
                continue;
            };
            let paths = if words.len() > 1 { &words[1..] } else { &words[..] };
            for word in paths {
                if let Arg::Path(path) = parse_arg(word)
                    && PATH_RE.is_match(&path)
                {
                    names.insert(root_of(&path).to_string());
                }
            }
        }
        names
    }

    /// Stages 2 and 3 in a single scan: each tag is tried as a helper call,
    /// then as a variable path. Replacement text is never scanned again, so
    /// values cannot assemble new tags.
    fn resolve_tags(
        &self,
        text: &str,
        scope: &Value,
        json_mode: bool,
    ) -> Result<String, TemplateError> {
        let mut failure = None;
        let rendered = TAG_RE.replace_all(text, |caps: &Captures<'_>| {
            let whole = caps[0].to_string();
            if failure.is_some() {
                return whole;
            }
            match self.call_helper(&caps[1], scope, json_mode) {
                Some(Ok(out)) => out,
                Some(Err(error)) => {
                    failure = Some(error);
                    whole
                }
                None => resolve_variable(&caps[1], scope, json_mode).unwrap_or(whole),
            }
        });

        match failure {
            Some(error) => Err(error),
            None => Ok(rendered.into_owned()),
        }
    }

    /// `None` when `body` is not a call to a registered helper.
    fn call_helper(
        &self,
        body: &str,
        scope: &Value,
        json_mode: bool,
    ) -> Option<Result<String, TemplateError>> {
        let words = split_words(body)?;
        let (name, rest) = words.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let helper = self.helpers.get(name.as_str())?;

        let args: Vec<Option<Value>> = rest
            .iter()
            .map(|word| match parse_arg(word) {
                Arg::Literal(value) => Some(value),
                Arg::Path(path) => resolve(scope, &path).cloned(),
            })
            .collect();

        Some(match helper.call(&args) {
            Ok(Rendered::Raw(out)) => Ok(out),
            Ok(Rendered::Text(out)) if json_mode => Ok(escape_json(&out)),
            Ok(Rendered::Text(out)) => Ok(out),
            Err(message) => Err(TemplateError::Helper {
                name: name.clone(),
                message,
            }),
        })
    }
}

/// JSON mode: the first character after whitespace and any leading
/// `{{#if}}`/`{{/if}}` tags is `{` or `[`, and does not open a tag.
fn is_json_template(template: &str) -> bool {
    let mut rest = template.trim_start();
    while rest.starts_with("{{") {
        match CONDITIONAL_RE.find(rest) {
            Some(tag) if tag.start() == 0 => rest = rest[tag.end()..].trim_start(),
            _ => break,
        }
    }
    rest.starts_with('[') || (rest.starts_with('{') && !rest.starts_with("{{"))
}

/// Stage 1: keep or drop each `{{#if}}` block. Blocks may not nest.
fn resolve_conditionals(template: &str, scope: &Value) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    // (flag, start of opening tag, end of opening tag)
    let mut open: Option<(String, usize, usize)> = None;

    for caps in CONDITIONAL_RE.captures_iter(template) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        match (caps.get(1), open.take()) {
            (Some(flag), None) => {
                open = Some((flag.as_str().to_string(), tag.start(), tag.end()));
            }
            (Some(_), Some((outer, _, _))) => {
                return Err(TemplateError::NestedConditional { flag: outer });
            }
            (None, Some((flag, start, body_start))) => {
                out.push_str(&template[cursor..start]);
                if is_truthy(resolve(scope, &flag)) {
                    out.push_str(&template[body_start..tag.start()]);
                }
                cursor = tag.end();
            }
            (None, None) => {
                return Err(TemplateError::UnbalancedConditional(format!(
                    "'{{{{/if}}}}' at byte {} has no matching '{{{{#if}}}}'",
                    tag.start()
                )));
            }
        }
    }

    if let Some((flag, start, _)) = open {
        return Err(TemplateError::UnbalancedConditional(format!(
            "'{{{{#if {flag}}}}}' at byte {start} is never closed"
        )));
    }
    out.push_str(&template[cursor..]);
    Ok(out)
}

/// Render a resolvable `{{path}}` body; `None` leaves the tag verbatim.
fn resolve_variable(body: &str, scope: &Value, json_mode: bool) -> Option<String> {
    if !PATH_RE.is_match(body) {
        return None;
    }
    resolve(scope, body).map(|value| render_value(value, json_mode))
}

/// Split a tag body on whitespace, keeping quoted strings together.
/// Returns `None` for an unterminated quote.
fn split_words(body: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut chars = body.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut word = String::new();
        if c == '"' || c == '\'' {
            let quote = c;
            word.push(chars.next()?);
            let mut closed = false;
            while let Some(next) = chars.next() {
                word.push(next);
                if next == '\\' {
                    word.push(chars.next()?);
                } else if next == quote {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return None;
            }
        } else {
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                word.push(next);
                chars.next();
            }
        }
        words.push(word);
    }
    Some(words)
}

fn parse_arg(word: &str) -> Arg {
    if word.len() >= 2 {
        if word.starts_with('"') && word.ends_with('"') {
            if let Ok(Value::String(s)) = serde_json::from_str::<Value>(word) {
                return Arg::Literal(Value::String(s));
            }
            return Arg::Literal(Value::String(word[1..word.len() - 1].to_string()));
        }
        if word.starts_with('\'') && word.ends_with('\'') {
            return Arg::Literal(Value::String(word[1..word.len() - 1].replace("\\'", "'")));
        }
    }
    match word {
        "true" => return Arg::Literal(Value::Bool(true)),
        "false" => return Arg::Literal(Value::Bool(false)),
        "null" => return Arg::Literal(Value::Null),
        _ => {}
    }
    if word.starts_with(|c: char| c.is_ascii_digit() || c == '-')
        && let Ok(number) = serde_json::from_str::<serde_json::Number>(word)
    {
        return Arg::Literal(Value::Number(number));
    }
    Arg::Path(word.to_string())
}
