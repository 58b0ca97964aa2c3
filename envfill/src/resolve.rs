//! # Placeholder Resolution
//!
//! Renders a decoded scalar node to text and resolves the
//! `${NAME}` / `${NAME:default}` placeholder syntax against an
//! environment lookup.
//!
//! The resolver is purely textual: it knows nothing about the target
//! field's type. All coercion happens in the converter after resolution.

use crate::env::EnvLookup;
use crate::error::Error;
use serde_json::Value;

/// Runtime kind name of a decoded node, for diagnostics.
pub fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Render a scalar node to its canonical text form.
///
/// Strings are taken verbatim, numbers and booleans use their canonical
/// text, and null renders to the empty string. Sequences and mappings
/// have no scalar rendering and are rejected.
pub(crate) fn render_scalar(node: &Value) -> Result<String, Error> {
    match node {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(Error::unsupported_kind(node_kind(node), node.to_string()))
        }
    }
}

/// Resolve the placeholder syntax in a rendered scalar.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Implements the `${NAME}` / `${NAME:default}` wire contract: the whole
/// string must match the pattern, `NAME` is looked up in the supplied
/// environment, and `default` is a literal fallback used when the
/// variable is unset or empty. Strings that do not match the pattern are
/// returned unchanged.
///
/// ## Usage
/// ```rust
/// use envfill::{MapEnv, resolve_placeholder};
///
/// let env = MapEnv::new().set("PORT", "1234");
/// assert_eq!(resolve_placeholder("${PORT:5432}", &env), "1234");
/// assert_eq!(resolve_placeholder("${MISSING:5432}", &env), "5432");
/// assert_eq!(resolve_placeholder("${MISSING}", &env), "");
/// assert_eq!(resolve_placeholder("plain", &env), "plain");
/// ```
pub fn resolve_placeholder(raw: &str, env: &dyn EnvLookup) -> String {
    let Some(body) = raw
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return raw.to_string();
    };
    let body = body.trim();
    let (name, default) = match body.split_once(':') {
        Some((name, default)) => (name, Some(default)),
        None => (body, None),
    };

    let resolved = match env.get(name) {
        Some(value) if !value.is_empty() => value,
        _ => match default {
            Some(default) => default.to_string(),
            None => {
                tracing::debug!(
                    name,
                    "environment variable unset with no default; resolved to empty string"
                );
                String::new()
            }
        },
    };
    strip_quotes(&resolved)
}

/// Render a node to text, then resolve any placeholder in it.
pub(crate) fn resolve_node(node: &Value, env: &dyn EnvLookup) -> Result<String, Error> {
    let rendered = render_scalar(node)?;
    Ok(resolve_placeholder(&rendered, env))
}

fn strip_quotes(value: &str) -> String {
    if value.contains('\'') {
        value.replace('\'', "")
    } else {
        value.to_string()
    }
}
