//! # Environment Lookup
//!
//! Injectable environment-variable access for placeholder resolution.
//!
//! The populate entry points take the lookup as an explicit capability
//! (`&dyn EnvLookup`) instead of reading a process-global hook, so tests
//! and embedding applications can substitute values without mutating the
//! real process environment.

use std::collections::HashMap;

/// Environment-variable lookup capability.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Abstracts where placeholder values come from. Production code uses
/// [`ProcessEnv`]; tests and embedders use [`MapEnv`] or their own impl.
///
/// ## Usage
/// ```rust
/// use envfill::{EnvLookup, MapEnv};
///
/// let env = MapEnv::new().set("DB_PORT", "1234");
/// assert_eq!(env.get("DB_PORT").as_deref(), Some("1234"));
/// assert_eq!(env.get_or("MISSING", "5432"), "5432");
/// ```
pub trait EnvLookup {
    /// Look up a variable by name. `None` when the variable is not set.
    fn get(&self, name: &str) -> Option<String>;

    /// Look up a variable, falling back to `default` when the variable is
    /// unset or set to the empty string.
    fn get_or(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }
}

/// Lookup backed by the real process environment.
///
/// Treats the environment as a read-only oracle; never writes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory lookup for tests and embedding applications.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, builder-style.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
