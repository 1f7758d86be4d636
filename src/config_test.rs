use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_key, "dev-123");
    assert_eq!(cfg.timeout, Duration::from_millis(10_000));
    assert!(cfg.with_credentials);
}

#[test]
fn blank_api_key_falls_back_to_dev_key() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "  ")])).unwrap();
    assert_eq!(cfg.api_key, DEFAULT_API_KEY);
}

#[test]
fn explicit_values_override_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        (ENV_API_BASE, "https://games.example.com/api/"),
        (ENV_API_KEY, "prod-key"),
        (ENV_WITH_CREDENTIALS, "off"),
        (ENV_TIMEOUT_MS, "2500"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base, "https://games.example.com/api");
    assert_eq!(cfg.api_key, "prod-key");
    assert!(!cfg.with_credentials);
    assert_eq!(cfg.timeout, Duration::from_millis(2500));
}

#[test]
fn invalid_timeout_is_rejected() {
    let err = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidValue { var: ENV_TIMEOUT_MS, value: "soon".to_owned() });
}

#[test]
fn invalid_credentials_flag_is_rejected() {
    let err = ClientConfig::from_lookup(lookup_from(&[(ENV_WITH_CREDENTIALS, "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { var: ENV_WITH_CREDENTIALS, .. }));
}

#[test]
fn endpoint_joins_without_double_slash() {
    let cfg = ClientConfig { api_base: "http://h/api".to_owned(), ..ClientConfig::default() };
    assert_eq!(cfg.endpoint("/games"), "http://h/api/games");
    assert_eq!(cfg.endpoint("me"), "http://h/api/me");
}

#[test]
fn parse_bool_accepts_common_spellings() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        assert_eq!(parse_bool(raw), Some(true), "{raw}");
    }
    for raw in ["0", "false", "No", "off"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw}");
    }
    assert_eq!(parse_bool("perhaps"), None);
}
