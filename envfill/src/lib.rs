//! # envfill
//!
//! Populates strongly-typed configuration records from JSON/YAML
//! documents with `${VAR}` / `${VAR:default}` environment placeholders.
//!
//! This crate provides:
//! - A generic document-to-record populator driven by compile-time
//!   generated field walks ([`config_record!`])
//! - Placeholder resolution against an injectable environment lookup
//! - String-to-typed conversion for numeric, boolean, temporal, opaque,
//!   and collection field kinds
//! - Configuration file loading with format auto-detection (JSON/YAML)
//!
//! # Best Practices
//!
//! - Check one configuration file into source control; inject
//!   environment-specific values at deploy time via placeholders
//! - Use [`MapEnv`] in tests instead of mutating the real process
//!   environment
//! - Treat a failed populate call as leaving the record in a
//!   partially-populated state; rebuild from `Default` before retrying
//!
//! # Example
//!
//! ```rust
//! use envfill::{MapEnv, config_record, populate_from_json_with};
//!
//! config_record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct DatabaseConfig {
//!         pub host: String => "host",
//!         pub port: u16 => "port",
//!         pub timeout: std::time::Duration => "timeout",
//!     }
//! }
//!
//! let doc = br#"{
//!     "host": "${DB_HOST:localhost}",
//!     "port": "${DB_PORT:5432}",
//!     "timeout": "${DB_TIMEOUT:30s}"
//! }"#;
//!
//! let env = MapEnv::new().set("DB_PORT", "1234");
//! let mut config = DatabaseConfig::default();
//! populate_from_json_with(doc, &mut config, &env).unwrap();
//!
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 1234);
//! assert_eq!(config.timeout, std::time::Duration::from_secs(30));
//! ```

pub mod convert;
pub mod env;
pub mod error;
pub mod file_loader;
pub mod populate;
pub mod resolve;

pub use convert::{FromNode, Mapping, RawValue};
pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use error::Error;
pub use file_loader::{
    load_from_file, load_from_file_with, load_from_json, load_from_json_with, load_from_yaml,
    load_from_yaml_with,
};
pub use populate::{
    Populate, populate_from_json, populate_from_json_with, populate_from_value,
    populate_from_yaml, populate_from_yaml_with,
};
pub use resolve::{node_kind, resolve_placeholder};

// Decoded document value, re-exported for dynamic fields and the
// `config_record!` expansion.
pub use serde_json::Value;
