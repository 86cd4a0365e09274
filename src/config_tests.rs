use super::*;
use std::collections::BTreeMap;

fn env_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn default_config_is_valid() {
    let config = default_config();
    validate_config(&config).expect("default config validates");
    let policy = config.policy();
    assert_eq!(policy.default_code(), "255");
    assert_eq!(policy.recognized(), ["255".to_string(), "27".to_string()]);
}

#[test]
fn env_overrides_replace_file_values() {
    let config = apply_env_overrides(
        default_config(),
        env_lookup(&[
            (ENV_COUNTRY_CODE, "254"),
            (ENV_RECOGNIZED_CODES, " 254, 255 ,,"),
            (ENV_OUTBOX, "/var/tmp/outbox.jsonl"),
            (ENV_DATA_CSV, "orders.csv"),
            (ENV_SENDER_ID, "MESSO"),
        ]),
    );
    assert_eq!(config.country_code, "254");
    assert_eq!(config.recognized_codes, vec!["254", "255"]);
    assert_eq!(config.outbox_path, PathBuf::from("/var/tmp/outbox.jsonl"));
    assert_eq!(config.data_csv, Some(PathBuf::from("orders.csv")));
    assert_eq!(config.sender_id.as_deref(), Some("MESSO"));
}

#[test]
fn blank_env_values_are_ignored() {
    let config = apply_env_overrides(
        default_config(),
        env_lookup(&[(ENV_COUNTRY_CODE, "  "), (ENV_SENDER_ID, "")]),
    );
    assert_eq!(config, default_config());
}

#[test]
fn rejects_non_digit_codes_and_unknown_schema() {
    let mut config = default_config();
    config.country_code = "+255".to_string();
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.recognized_codes.push(String::new());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.schema_version = 2;
    let err = validate_config(&config).expect_err("schema mismatch");
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn config_file_round_trips_and_fills_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested/messo.json");
    let mut config = default_config();
    config.sender_id = Some("SHOP".to_string());
    write_config(&path, &config).expect("write config");
    assert_eq!(read_config(&path).expect("read config"), config);

    let partial = dir.path().join("partial.json");
    std::fs::write(&partial, r#"{"country_code": "254"}"#).expect("write partial");
    let loaded = read_config(&partial).expect("read partial config");
    assert_eq!(loaded.country_code, "254");
    assert_eq!(loaded.outbox_path, default_config().outbox_path);
}

#[test]
fn unknown_config_fields_are_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("messo.json");
    std::fs::write(&path, r#"{"provider": "fasthub"}"#).expect("write config");
    assert!(read_config(&path).is_err());
}
