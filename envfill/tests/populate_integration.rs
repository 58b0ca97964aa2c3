//! End-to-end population through the public API: record declaration via
//! `config_record!`, JSON/YAML entry points, file loading, and the real
//! process environment.

use envfill::{
    Error, MapEnv, config_record, load_from_file_with, populate_from_json, populate_from_json_with,
    populate_from_yaml_with,
};
use serial_test::serial;
use std::collections::HashMap;
use std::time::Duration;

config_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct PoolConfig {
        pub size: u32 => "size",
        pub idle_timeout: Duration => "idle_timeout",
    }
}

config_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct StorageConfig {
        pub hosts: Vec<String> => "hosts",
        pub ports: HashMap<String, i64> => "ports",
        pub pool: PoolConfig => "pool",
        pub options: serde_json::Value => "options",
    }
}

#[test]
fn populates_nested_records_through_public_api() {
    let doc = br#"
    {
        "hosts": ["${ST_HOST:localhost}"],
        "ports": {"primary": "${ST_PORT:5432}", "replica": "${ST_REPLICA:5433}"},
        "pool": {"size": "${ST_POOL:10}", "idle_timeout": "90s"},
        "options": {"sslmode": "require"}
    }"#;

    let env = MapEnv::new().set("ST_HOST", "db.internal").set("ST_PORT", "6543");
    let mut config = StorageConfig::default();
    populate_from_json_with(doc, &mut config, &env).unwrap();

    assert_eq!(config.hosts, vec!["db.internal".to_string()]);
    assert_eq!(config.ports["primary"], 6543);
    assert_eq!(config.ports["replica"], 5433);
    assert_eq!(config.pool.size, 10);
    assert_eq!(config.pool.idle_timeout, Duration::from_secs(90));
    assert_eq!(config.options, serde_json::json!({"sslmode": "require"}));
}

#[test]
fn yaml_and_json_documents_populate_identically() {
    let json = br#"{"pool": {"size": "${Q_SIZE:7}", "idle_timeout": "1m"}}"#;
    let yaml = b"pool:\n  size: \"${Q_SIZE:7}\"\n  idle_timeout: 1m\n";

    let env = MapEnv::new();
    let mut from_json = StorageConfig::default();
    let mut from_yaml = StorageConfig::default();
    populate_from_json_with(json, &mut from_json, &env).unwrap();
    populate_from_yaml_with(yaml, &mut from_yaml, &env).unwrap();
    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json.pool.size, 7);
    assert_eq!(from_json.pool.idle_timeout, Duration::from_secs(60));
}

#[test]
fn file_loading_resolves_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.yaml");
    std::fs::write(
        &path,
        b"hosts:\n  - \"${F_HOST:files.example.com}\"\npool:\n  size: \"${F_POOL:3}\"\n",
    )
    .unwrap();

    let env = MapEnv::new().set("F_POOL", "12");
    let config: StorageConfig = load_from_file_with(&path, &env).unwrap();
    assert_eq!(config.hosts, vec!["files.example.com".to_string()]);
    assert_eq!(config.pool.size, 12);
}

#[test]
fn conversion_failure_reports_the_nested_field_path() {
    let doc = br#"{"pool": {"size": "many"}}"#;
    let mut config = StorageConfig::default();
    let err = populate_from_json_with(doc, &mut config, &MapEnv::new()).unwrap_err();
    assert!(matches!(&err, Error::Field { field, .. } if field == "pool"));
    assert!(err.to_string().contains("field 'size'"));
}

#[test]
#[serial]
fn process_environment_wins_over_inline_default() {
    unsafe {
        std::env::set_var("ENVFILL_IT_PORT", "4321");
    }
    let mut config = StorageConfig::default();
    populate_from_json(
        br#"{"ports": {"primary": "${ENVFILL_IT_PORT:5432}"}}"#,
        &mut config,
    )
    .unwrap();
    unsafe {
        std::env::remove_var("ENVFILL_IT_PORT");
    }
    assert_eq!(config.ports["primary"], 4321);
}

#[test]
#[serial]
fn unset_process_variable_falls_back_to_default() {
    unsafe {
        std::env::remove_var("ENVFILL_IT_UNSET");
    }
    let mut config = StorageConfig::default();
    populate_from_json(
        br#"{"ports": {"primary": "${ENVFILL_IT_UNSET:5432}"}}"#,
        &mut config,
    )
    .unwrap();
    assert_eq!(config.ports["primary"], 5432);
}
