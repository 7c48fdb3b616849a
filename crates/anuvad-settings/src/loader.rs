//! Settings loading: file discovery, deep merge, environment overrides.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::{AnuvadSettings, LogFormat};

/// Directory under `$HOME` holding the settings file.
const SETTINGS_DIR: &str = ".anuvad";
/// Settings file name.
const SETTINGS_FILE: &str = "settings.json";

/// Default settings file location: `~/.anuvad/settings.json`.
///
/// Falls back to the current directory when `HOME` is unset.
pub fn settings_path() -> PathBuf {
    let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(SETTINGS_DIR).join(SETTINGS_FILE)
}

/// Load settings from the default location with env overrides applied.
pub fn load_settings() -> Result<AnuvadSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path`, deep-merged over defaults, then apply
/// `ANUVAD_*` environment overrides.
///
/// A missing file is not an error: defaults (plus env) are returned.
pub fn load_settings_from_path(path: &Path) -> Result<AnuvadSettings> {
    let mut settings = read_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

fn read_file_layer(path: &Path) -> Result<AnuvadSettings> {
    if !path.exists() {
        debug!(?path, "no settings file, using defaults");
        return Ok(AnuvadSettings::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let user: Value = serde_json::from_str(&raw).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = serde_json::to_value(AnuvadSettings::default()).map_err(SettingsError::Merge)?;
    serde_json::from_value(deep_merge(defaults, user)).map_err(SettingsError::Merge)
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value (including arrays)
/// replaces the base value. `null` in the overlay keeps the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Apply `ANUVAD_*` overrides from the process environment.
pub fn apply_env_overrides(settings: &mut AnuvadSettings) {
    apply_env_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Apply `ANUVAD_*` overrides using `lookup` as the variable source.
///
/// Unparseable numeric or enum values are ignored with a warning.
pub fn apply_env_overrides_from(
    settings: &mut AnuvadSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("ANUVAD_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = parsed(&lookup, "ANUVAD_PORT") {
        settings.server.port = v;
    }
    if let Some(v) = lookup("ANUVAD_WS_PATH") {
        settings.server.ws_path = v;
    }
    if let Some(v) = lookup("ANUVAD_DEFAULT_LANG") {
        settings.server.default_lang = v;
    }
    if let Some(v) = lookup("ANUVAD_TRANSLATOR_BASE_URL") {
        settings.translator.base_url = v;
    }
    if let Some(v) = parsed(&lookup, "ANUVAD_TRANSLATOR_TIMEOUT_MS") {
        settings.translator.timeout_ms = v;
    }
    if let Some(v) = lookup("ANUVAD_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = parsed::<LogFormat>(&lookup, "ANUVAD_LOG_FORMAT") {
        settings.logging.format = v;
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring invalid environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn deep_merge_nested_objects() {
        let base = json!({"server": {"host": "a", "port": 1}});
        let overlay = json!({"server": {"port": 2}});
        let merged = deep_merge(base, overlay);
        assert_eq!(merged, json!({"server": {"host": "a", "port": 2}}));
    }

    #[test]
    fn deep_merge_null_keeps_base() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn deep_merge_arrays_replace() {
        let merged = deep_merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged["a"], json!([3]));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_file_layer(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"server": {"defaultLang": "fr"}, "translator": {"timeoutMs": 2500}}"#,
        )
        .unwrap();

        let settings = read_file_layer(&path).unwrap();
        assert_eq!(settings.server.default_lang, "fr");
        assert_eq!(settings.translator.timeout_ms, 2500);
        assert_eq!(settings.server.ws_path, "/ws");
        assert_eq!(settings.translator.source_lang, "auto");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_file_layer(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
    }

    #[test]
    fn wrong_type_is_a_merge_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"server": {"port": "eighty"}}"#).unwrap();

        let err = read_file_layer(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Merge(_)));
    }

    #[test]
    fn load_from_path_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"server": {"wsPath": "live"}}"#).unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert!(settings.server.ws_path.starts_with('/'));
    }

    #[test]
    fn env_overrides_apply() {
        let mut settings = AnuvadSettings::default();
        apply_env_overrides_from(
            &mut settings,
            env(&[
                ("ANUVAD_HOST", "0.0.0.0"),
                ("ANUVAD_PORT", "9001"),
                ("ANUVAD_DEFAULT_LANG", "ta"),
                ("ANUVAD_TRANSLATOR_TIMEOUT_MS", "1500"),
                ("ANUVAD_LOG_FORMAT", "json"),
            ]),
        );
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9001);
        assert_eq!(settings.server.default_lang, "ta");
        assert_eq!(settings.translator.timeout_ms, 1500);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = AnuvadSettings::default();
        apply_env_overrides_from(
            &mut settings,
            env(&[("ANUVAD_PORT", "not-a-port"), ("ANUVAD_LOG_FORMAT", "xml")]),
        );
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn no_env_leaves_defaults() {
        let mut settings = AnuvadSettings::default();
        apply_env_overrides_from(&mut settings, |_| None);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.translator.base_url, "https://translate.googleapis.com");
    }

    #[test]
    fn settings_path_ends_with_expected_file() {
        let path = settings_path();
        assert!(path.ends_with(".anuvad/settings.json"));
    }
}
