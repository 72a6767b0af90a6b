use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_uses_defaults() {
    let cfg = AppConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.store_path, PathBuf::from("gradebook.json"));
    assert_eq!(cfg.key_prefix, "gradebook:");
}

#[test]
fn from_vars_reads_overrides() {
    let cfg = AppConfig::from_vars(vars(&[
        ("GRADEBOOK_STORE_PATH", "/tmp/period1.json"),
        ("GRADEBOOK_KEY_PREFIX", "school:"),
    ]))
    .unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/period1.json"));
    assert_eq!(cfg.key_prefix, "school:");
}

#[test]
fn from_vars_rejects_blank_values() {
    assert_eq!(
        AppConfig::from_vars(vars(&[("GRADEBOOK_STORE_PATH", "  ")])),
        Err(ConfigError::Empty { var: "GRADEBOOK_STORE_PATH" })
    );
    assert_eq!(
        AppConfig::from_vars(vars(&[("GRADEBOOK_KEY_PREFIX", "")])),
        Err(ConfigError::Empty { var: "GRADEBOOK_KEY_PREFIX" })
    );
}

#[test]
fn from_vars_rejects_spaced_prefix() {
    let err = AppConfig::from_vars(vars(&[("GRADEBOOK_KEY_PREFIX", "my book:")])).unwrap_err();
    assert_eq!(err, ConfigError::Whitespace { var: "GRADEBOOK_KEY_PREFIX", value: "my book:".to_owned() });
}

#[test]
fn flags_override_environment() {
    let cfg = AppConfig::default()
        .with_overrides(Some(PathBuf::from("other.json")), Some("t:".to_owned()))
        .unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("other.json"));
    assert_eq!(cfg.key_prefix, "t:");

    let unchanged = AppConfig::default().with_overrides(None, None).unwrap();
    assert_eq!(unchanged, AppConfig::default());

    assert_eq!(
        AppConfig::default().with_overrides(None, Some(String::new())),
        Err(ConfigError::Empty { var: "--key-prefix" })
    );
}
