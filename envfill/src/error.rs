//! # Population Errors
//!
//! Error types for document decoding, placeholder resolution, and typed
//! field population.
//!
//! All variants use named fields and carry enough context to identify the
//! failing field path and the underlying cause. Errors are returned to the
//! caller, never logged and swallowed.

use thiserror::Error;

/// Error produced while decoding a document or populating a record.
///
/// A failed populate call leaves the target record partially populated:
/// fields processed before the failing one keep their assigned values.
/// Callers must treat the record as implementation-defined after an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not a valid JSON document.
    #[error("invalid JSON document: {message}")]
    JsonDecode { message: String },

    /// The input bytes are not a valid YAML document.
    #[error("invalid YAML document: {message}")]
    YamlDecode { message: String },

    /// Configuration file could not be read.
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file path has no extension to detect the format from.
    #[error("config file has no extension")]
    NoExtension,

    /// Configuration file extension is not a supported format.
    #[error("unsupported config file format: {format}")]
    UnsupportedFormat { format: String },

    /// The decoded node's runtime kind does not match the declared field
    /// kind (e.g. a mapping arrived where a sequence was declared).
    #[error("expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A resolved scalar string could not be parsed as the declared type.
    #[error("cannot convert {value:?} to {target}: {reason}")]
    Conversion {
        target: &'static str,
        value: String,
        reason: String,
    },

    /// The decoded node's kind has no conversion for the declared field
    /// (e.g. a mapping reaching a scalar conversion).
    #[error("unsupported {kind} value: {value}")]
    UnsupportedKind { kind: &'static str, value: String },

    /// Wraps an error with the name of the field being populated. Nested
    /// records produce a chain of these, forming the failing field path.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn shape_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Error::ShapeMismatch { expected, actual }
    }

    pub(crate) fn conversion(
        target: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Conversion {
            target,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_kind(kind: &'static str, value: impl Into<String>) -> Self {
        Error::UnsupportedKind {
            kind,
            value: value.into(),
        }
    }

    /// Attach the name of the field whose population failed.
    #[must_use]
    pub fn in_field(self, field: &str) -> Self {
        Error::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wrapping_builds_path() {
        let err = Error::conversion("i64", "abc", "invalid digit")
            .in_field("port")
            .in_field("server");
        assert_eq!(
            err.to_string(),
            "field 'server': field 'port': cannot convert \"abc\" to i64: invalid digit"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::shape_mismatch("sequence", "mapping");
        assert_eq!(err.to_string(), "expected sequence, got mapping");
    }

    #[test]
    fn test_unsupported_kind_display() {
        let err = Error::unsupported_kind("mapping", "{\"a\":1}");
        assert_eq!(err.to_string(), "unsupported mapping value: {\"a\":1}");
    }
}
