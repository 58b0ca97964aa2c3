//! # Configuration File Loading
//!
//! Loads and populates records from JSON or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::env::{EnvLookup, ProcessEnv};
use crate::error::Error;
use crate::populate::{Populate, populate_from_json_with, populate_from_yaml_with};
use std::path::Path;

/// Load a record from a JSON file using the process environment.
pub fn load_from_json<T: Populate + Default>(path: &Path) -> Result<T, Error> {
    load_from_json_with(path, &ProcessEnv)
}

/// Load a record from a JSON file using the supplied environment lookup.
pub fn load_from_json_with<T: Populate + Default>(
    path: &Path,
    env: &dyn EnvLookup,
) -> Result<T, Error> {
    let contents = std::fs::read(path).map_err(|_e| Error::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut record = T::default();
    populate_from_json_with(&contents, &mut record, env)?;
    tracing::debug!(path = %path.display(), format = "json", "loaded configuration file");
    Ok(record)
}

/// Load a record from a YAML file using the process environment.
pub fn load_from_yaml<T: Populate + Default>(path: &Path) -> Result<T, Error> {
    load_from_yaml_with(path, &ProcessEnv)
}

/// Load a record from a YAML file using the supplied environment lookup.
pub fn load_from_yaml_with<T: Populate + Default>(
    path: &Path,
    env: &dyn EnvLookup,
) -> Result<T, Error> {
    let contents = std::fs::read(path).map_err(|_e| Error::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut record = T::default();
    populate_from_yaml_with(&contents, &mut record, env)?;
    tracing::debug!(path = %path.display(), format = "yaml", "loaded configuration file");
    Ok(record)
}

/// Load a record from a file with format auto-detection.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Loads a configuration file, detecting the format from the extension.
///
/// ## Supported Formats
/// - `.json`: JSON format
/// - `.yaml`: YAML format
/// - `.yml`: YAML format
///
/// ## Error Handling
/// Returns [`Error`] for:
/// - File not found
/// - Missing or unsupported file extension
/// - Decode and population errors for the detected format
pub fn load_from_file<T: Populate + Default>(path: &Path) -> Result<T, Error> {
    load_from_file_with(path, &ProcessEnv)
}

/// Load a record from a file with format auto-detection, using the
/// supplied environment lookup.
pub fn load_from_file_with<T: Populate + Default>(
    path: &Path,
    env: &dyn EnvLookup,
) -> Result<T, Error> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(Error::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => load_from_json_with(path, env),
        "yaml" | "yml" => load_from_yaml_with(path, env),
        other => Err(Error::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_record;
    use crate::env::MapEnv;
    use std::fs;
    use tempfile::NamedTempFile;

    config_record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct FileConfig {
            host: String => "host",
            port: u16 => "port",
        }
    }

    #[test]
    fn test_load_from_json() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("json");
        fs::write(&path, br#"{"host": "${H:localhost}", "port": "${P:5432}"}"#).unwrap();

        let env = MapEnv::new().set("P", "9999");
        let config: FileConfig = load_from_json_with(&path, &env).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn test_load_from_yaml() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("yaml");
        fs::write(&path, b"host: \"${H:yamlhost}\"\nport: 8080\n").unwrap();

        let config: FileConfig = load_from_yaml_with(&path, &MapEnv::new()).unwrap();
        assert_eq!(config.host, "yamlhost");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_load_from_file_auto_detect() {
        let file = NamedTempFile::new().unwrap();
        let json_path = file.path().with_extension("json");
        fs::write(&json_path, br#"{"host": "auto"}"#).unwrap();
        let config: FileConfig = load_from_file_with(&json_path, &MapEnv::new()).unwrap();
        assert_eq!(config.host, "auto");

        let yml_path = file.path().with_extension("yml");
        fs::write(&yml_path, b"host: auto-yaml\n").unwrap();
        let config: FileConfig = load_from_file_with(&yml_path, &MapEnv::new()).unwrap();
        assert_eq!(config.host, "auto-yaml");
    }

    #[test]
    fn test_load_from_file_unsupported() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("toml");
        fs::write(&path, b"host = \"x\"\n").unwrap();

        let result: Result<FileConfig, _> = load_from_file_with(&path, &MapEnv::new());
        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_load_from_file_no_extension() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("");
        fs::write(&path, b"").unwrap();

        let result: Result<FileConfig, _> = load_from_file_with(&path, &MapEnv::new());
        assert!(matches!(result, Err(Error::NoExtension)));
    }

    #[test]
    fn test_load_from_json_not_found() {
        let path = Path::new("/nonexistent/path/config.json");
        let result: Result<FileConfig, _> = load_from_json(path);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
