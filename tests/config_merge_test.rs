//! Integration tests for layered configuration merging and typed access.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use proptest::prelude::*;
use tempfile::NamedTempFile;

use groundwork::{Config, ConfigError, ConfigSource};

fn load(sources: Vec<ConfigSource>) -> Config {
    Config::load(sources, vec![]).expect("config should load")
}

#[test]
fn test_highest_priority_source_wins_per_key() {
    let config = load(vec![
        ConfigSource::yaml("a:\n  b: 1\n"),
        ConfigSource::yaml("a:\n  b: 2\n  c: 3\n"),
    ]);

    assert_eq!(config.get_i64("a.b").unwrap(), 2);
    assert_eq!(config.get_i64("a.c").unwrap(), 3);
}

#[test]
fn test_env_outranks_file_outranks_defaults() {
    temp_env::with_vars(
        [
            ("GW_MERGE_SERVICE__PORT", Some("9999")),
            ("GW_MERGE_SERVICE__HOST", None),
        ],
        || {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "service:\n  port: 8080\n  host: localhost").unwrap();
            file.flush().unwrap();

            let config = load(vec![
                ConfigSource::defaults(serde_json::json!({
                    "service": { "port": 1, "host": "default-host", "scheme": "http" }
                })),
                ConfigSource::file(file.path()),
                ConfigSource::env("GW_MERGE_"),
            ]);

            // env wins over file
            assert_eq!(config.get_i64("service.port").unwrap(), 9999);
            // file wins over defaults
            assert_eq!(config.get_str("service.host").unwrap(), "localhost");
            // defaults persist when nothing overrides them
            assert_eq!(config.get_str("service.scheme").unwrap(), "http");
        },
    );
}

#[test]
fn test_missing_key_fails_with_key_name() {
    let config = load(vec![ConfigSource::yaml("a:\n  b: 1\n")]);

    let err = config.get_str("missing.key").unwrap_err();
    match err {
        ConfigError::MissingKey { key } => assert_eq!(key, "missing.key"),
        other => panic!("expected MissingKey, got {other}"),
    }
    assert!(err_to_string(&config, "missing.key").contains("missing.key"));
}

fn err_to_string(config: &Config, key: &str) -> String {
    config.get_str(key).unwrap_err().to_string()
}

#[test]
fn test_type_mismatch_taxonomy() {
    let config = load(vec![ConfigSource::yaml("service:\n  port: some-string\n")]);

    match config.get_i64("service.port").unwrap_err() {
        ConfigError::TypeMismatch { key, actual, .. } => {
            assert_eq!(key, "service.port");
            assert_eq!(actual, "string");
        }
        other => panic!("expected TypeMismatch, got {other}"),
    }
}

#[test]
fn test_durations_and_lists() {
    let config = load(vec![ConfigSource::yaml(
        "timeouts:\n  connect: 30s\n  retry: 250ms\n  idle: 5000\npeers: [alpha, beta]\n",
    )]);

    assert_eq!(
        config.get_duration("timeouts.connect").unwrap(),
        Duration::from_secs(30)
    );
    assert_eq!(
        config.get_duration("timeouts.retry").unwrap(),
        Duration::from_millis(250)
    );
    assert_eq!(
        config.get_duration("timeouts.idle").unwrap(),
        Duration::from_millis(5000)
    );
    assert_eq!(config.get_strings("peers").unwrap(), vec!["alpha", "beta"]);
}

#[test]
fn test_interpolation_in_files() {
    temp_env::with_vars(
        [
            ("GW_MERGE_TOKEN", Some("sekrit")),
            ("GW_MERGE_REGION", None),
        ],
        || {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(
                file,
                "auth:\n  token: ${{GW_MERGE_TOKEN}}\n  region: ${{GW_MERGE_REGION:-eu-west-1}}"
            )
            .unwrap();
            file.flush().unwrap();

            let config = load(vec![ConfigSource::file(file.path())]);
            assert_eq!(config.get_str("auth.token").unwrap(), "sekrit");
            assert_eq!(config.get_str("auth.region").unwrap(), "eu-west-1");
        },
    );
}

#[test]
fn test_unset_variable_without_fallback_is_fatal() {
    temp_env::with_var_unset("GW_MERGE_ABSENT", || {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "auth:\n  token: ${{GW_MERGE_ABSENT}}").unwrap();
        file.flush().unwrap();

        let err = Config::load(vec![ConfigSource::file(file.path())], vec![]).unwrap_err();
        match err {
            ConfigError::MissingEnvVar { name, .. } => assert_eq!(name, "GW_MERGE_ABSENT"),
            other => panic!("expected MissingEnvVar, got {other}"),
        }
    });
}

#[test]
fn test_reload_swaps_snapshot_wholesale() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "service:\n  name: first").unwrap();
    file.flush().unwrap();

    let config = load(vec![ConfigSource::file(file.path())]);
    assert_eq!(config.get_str("service.name").unwrap(), "first");

    std::fs::write(file.path(), "service:\n  name: second\n").unwrap();
    config.reload().expect("reload should succeed");
    assert_eq!(config.get_str("service.name").unwrap(), "second");
}

#[test]
fn test_failed_reload_keeps_previous_snapshot() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "service:\n  name: stable").unwrap();
    file.flush().unwrap();

    let config = load(vec![ConfigSource::file(file.path())]);

    std::fs::write(file.path(), "service: [broken\n").unwrap();
    assert!(config.reload().is_err());
    assert_eq!(config.get_str("service.name").unwrap(), "stable");
}

#[test]
fn test_origin_distinguishes_layers() {
    temp_env::with_var("GW_ORIGIN_SERVICE__PORT", Some("7777"), || {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "service:\n  name: billing\n  port: 8080").unwrap();
        file.flush().unwrap();

        let config = load(vec![
            ConfigSource::file(file.path()),
            ConfigSource::env("GW_ORIGIN_"),
        ]);

        let name_origin = config.origin("service.name").expect("origin for name");
        let port_origin = config.origin("service.port").expect("origin for port");
        assert_ne!(name_origin, port_origin);
        assert!(name_origin.contains("YAML file"));
    });
}

proptest! {
    /// For arbitrary layer stacks, every key resolves to the value from the
    /// highest-priority layer that defines it, and keys defined nowhere fail
    /// with MissingKey.
    #[test]
    fn prop_last_writer_wins(
        layers in proptest::collection::vec(
            proptest::collection::btree_map("[a-d]", any::<i64>(), 0..4),
            1..5,
        )
    ) {
        let sources: Vec<ConfigSource> = layers
            .iter()
            .map(|layer| {
                if layer.is_empty() {
                    return ConfigSource::yaml("{}");
                }
                let doc: String = layer
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}\n"))
                    .collect();
                ConfigSource::yaml(doc)
            })
            .collect();

        let mut expected: BTreeMap<String, i64> = BTreeMap::new();
        for layer in &layers {
            for (k, v) in layer {
                expected.insert(k.clone(), *v);
            }
        }

        let config = Config::load(sources, vec![]).expect("layers should merge");

        for (key, value) in &expected {
            prop_assert_eq!(config.get_i64(key).unwrap(), *value);
        }

        for key in ["a", "b", "c", "d"] {
            if !expected.contains_key(key) {
                let is_missing_key =
                    matches!(config.get_i64(key), Err(ConfigError::MissingKey { .. }));
                prop_assert!(is_missing_key);
            }
        }
    }
}
