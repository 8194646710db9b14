//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use crate::config::{BusKind, Config, LogLevel};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.bus.kind, BusKind::System);
    assert_eq!(config.bus.service, "com.intel.GPU");
    assert_eq!(config.bus.manager_path, "/com/intel/GPU");
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(!toml_str.is_empty());
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[bus]"));
    assert!(toml_str.contains("com.intel.GPU"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [bus]
        kind = "session"
        service = "com.example.StagingGPU"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.bus.kind, BusKind::Session);
    assert_eq!(config.bus.service, "com.example.StagingGPU");
    // omitted field keeps its default
    assert_eq!(config.bus.manager_path, "/com/intel/GPU");
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();

    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(original.bus, deserialized.bus);
    assert_eq!(original.general.log_level, deserialized.general.log_level);
}

#[test]
fn config_minimal_toml() {
    let minimal_toml = r#"
        [general]
    "#;

    let config: Config = toml::from_str(minimal_toml).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.bus.service, "com.intel.GPU");
}

#[test]
fn config_empty_toml() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.bus.kind, BusKind::System);
}

#[test]
fn config_rejects_unknown_log_level() {
    let toml_str = r#"
        [general]
        log_level = "loud"
    "#;

    let result: Result<Config, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

#[test]
fn log_level_display() {
    assert_eq!(LogLevel::Error.to_string(), "error");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}
