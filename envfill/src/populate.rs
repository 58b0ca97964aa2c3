//! # Record Population
//!
//! Walks a record's declared fields in lock-step with a decoded document
//! mapping, resolving placeholders and converting each present value.
//!
//! Records declare their shape once through [`config_record!`], which
//! generates the per-record walk at compile time; the populator itself
//! stays generic with no runtime type introspection.

use crate::convert::Mapping;
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::Error;
use crate::resolve::node_kind;
use serde_json::Value;

/// Transfer values from a decoded mapping into a record's fields.
///
/// Fields whose lookup key is absent from the mapping keep their prior
/// value. The first conversion failure aborts the call, wrapped with the
/// offending field's name; fields assigned before the failure keep their
/// values (no rollback).
///
/// Implementations are generated by [`config_record!`]; hand-written
/// impls are possible but rarely needed.
pub trait Populate {
    fn populate(&mut self, node: &Mapping, env: &dyn EnvLookup) -> Result<(), Error>;
}

/// Declare a configuration record and generate its population glue.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Defines a struct and derives its [`Populate`](crate::Populate) and
/// [`FromNode`](crate::FromNode) impls from a per-field lookup-key
/// declaration, replacing hand-written field-walking glue.
///
/// ## Usage
/// ```rust
/// use envfill::{MapEnv, config_record, populate_from_json_with};
///
/// config_record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct ServerConfig {
///         pub host: String => "host",
///         pub port: u16 => "port" | "listen_port",
///     }
/// }
///
/// let mut config = ServerConfig::default();
/// let env = MapEnv::new().set("PORT", "9090");
/// populate_from_json_with(
///     br#"{"host": "0.0.0.0", "port": "${PORT:8080}"}"#,
///     &mut config,
///     &env,
/// ).unwrap();
/// assert_eq!(config.port, 9090);
/// ```
///
/// ## Field syntax
/// - `name: Ty => "key"` — looked up under `"key"`.
/// - `name: Ty => "key" | "alt"` — `"key"` first, `"alt"` as fallback.
/// - `name: Ty` — no lookup key; the field is never populated from a
///   document and always keeps its default.
///
/// The struct must derive (or implement) `Default`; nested record
/// conversion starts from the default value.
#[macro_export]
macro_rules! config_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $key:literal $(| $alt:literal)?)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )+
        }

        impl $crate::Populate for $name {
            fn populate(
                &mut self,
                node: &$crate::Mapping,
                env: &dyn $crate::EnvLookup,
            ) -> ::std::result::Result<(), $crate::Error> {
                $(
                    $(
                        if let ::std::option::Option::Some(raw) = node
                            .get($key)
                            $( .or_else(|| node.get($alt)) )?
                        {
                            self.$field = <$ty as $crate::FromNode>::from_node(raw, env)
                                .map_err(|e| e.in_field(stringify!($field)))?;
                        }
                    )?
                )+
                ::std::result::Result::Ok(())
            }
        }

        impl $crate::FromNode for $name {
            fn from_node(
                node: &$crate::Value,
                env: &dyn $crate::EnvLookup,
            ) -> ::std::result::Result<Self, $crate::Error> {
                let map = node.as_object().ok_or_else(|| {
                    $crate::Error::ShapeMismatch {
                        expected: "mapping",
                        actual: $crate::node_kind(node),
                    }
                })?;
                let mut record = <$name as ::std::default::Default>::default();
                $crate::Populate::populate(&mut record, map, env)?;
                ::std::result::Result::Ok(record)
            }
        }
    };
}

/// Populate a record from JSON bytes using the process environment.
pub fn populate_from_json<T: Populate>(bytes: &[u8], record: &mut T) -> Result<(), Error> {
    populate_from_json_with(bytes, record, &ProcessEnv)
}

/// Populate a record from JSON bytes using the supplied environment
/// lookup.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Decodes `bytes` as JSON and walks the record's declared fields,
/// resolving `${VAR:default}` placeholders through `env` and converting
/// each value to the declared field type.
///
/// ## Error Handling
/// - [`Error::JsonDecode`] before any field is touched when the bytes
///   are not valid JSON.
/// - [`Error::ShapeMismatch`] when the document root is not a mapping,
///   or a node's kind does not match its field.
/// - [`Error::Conversion`] / [`Error::UnsupportedKind`] per field,
///   wrapped in [`Error::Field`] with the field name.
///
/// On failure the record keeps whatever fields were assigned before the
/// failing one.
pub fn populate_from_json_with<T: Populate>(
    bytes: &[u8],
    record: &mut T,
    env: &dyn EnvLookup,
) -> Result<(), Error> {
    let doc: Value = serde_json::from_slice(bytes).map_err(|e| Error::JsonDecode {
        message: e.to_string(),
    })?;
    populate_from_value(&doc, record, env)
}

/// Populate a record from YAML bytes using the process environment.
pub fn populate_from_yaml<T: Populate>(bytes: &[u8], record: &mut T) -> Result<(), Error> {
    populate_from_yaml_with(bytes, record, &ProcessEnv)
}

/// Populate a record from YAML bytes using the supplied environment
/// lookup. YAML decodes into the same tree shape as JSON, so the walk is
/// format-agnostic past this point.
pub fn populate_from_yaml_with<T: Populate>(
    bytes: &[u8],
    record: &mut T,
    env: &dyn EnvLookup,
) -> Result<(), Error> {
    let doc: Value = serde_yaml::from_slice(bytes).map_err(|e| Error::YamlDecode {
        message: e.to_string(),
    })?;
    populate_from_value(&doc, record, env)
}

/// Populate a record from an already-decoded document.
pub fn populate_from_value<T: Populate>(
    doc: &Value,
    record: &mut T,
    env: &dyn EnvLookup,
) -> Result<(), Error> {
    let map = doc
        .as_object()
        .ok_or_else(|| Error::shape_mismatch("mapping", node_kind(doc)))?;
    record.populate(map, env)
}
