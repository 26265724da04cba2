//! aurora-config
//!
//! Layered YAML configuration for *deployment* concerns only: where
//! persisted history/audit state lives, where upstream credentials are
//! read from, and the log level. Frozen scoring constants (weights,
//! window sizes, band thresholds) are NOT configurable here — they stay
//! Rust `const`s exported from `aurora-schemas`, per spec.md §6.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Deployment settings, loaded from layered YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory for `aurora-history`'s CSV file and `aurora-audit`'s
    /// JSONL log.
    pub persisted_state_root: PathBuf,
    /// Path to upstream vendor credentials, read by `aurora-ingest`'s real
    /// (non-fixture) data sources. Optional because the fixture source
    /// needs none.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    /// `tracing-subscriber` `EnvFilter` directive, e.g. `"info"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Result of a layered load: the typed `Settings`, the canonical JSON used
/// to derive them, and a hash of that canonical form for audit trails.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    pub canonical_json: String,
    pub config_hash: String,
}

/// Loads + deep-merges YAML files in order (later files override earlier
/// ones), canonicalizes (sorted keys) for a stable hash, then deserializes
/// into [`Settings`].
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());

    for p in paths {
        let s = fs::read_to_string(p).with_context(|| format!("read config: {p}"))?;
        let yaml_val: serde_yaml::Value = serde_yaml::from_str(&s).with_context(|| format!("parse yaml: {p}"))?;
        let json_val = serde_json::to_value(yaml_val).context("yaml->json conversion failed")?;
        deep_merge(&mut merged, json_val);
    }

    let canonical = canonicalize_json(&merged);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hash = hex::encode(hasher.finalize());

    let settings: Settings = serde_json::from_str(&canonical).context("config does not match Settings schema")?;

    Ok(LoadedConfig {
        settings,
        canonical_json: canonical,
        config_hash: hash,
    })
}

/// Deep-merge: objects merge recursively; arrays and scalars overwrite.
fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (k, v) in src_map {
                match dst_map.get_mut(&k) {
                    Some(existing) => deep_merge(existing, v),
                    None => {
                        dst_map.insert(k, v);
                    }
                }
            }
        }
        (dst_slot, src_val) => {
            *dst_slot = src_val;
        }
    }
}

fn canonicalize_json(v: &Value) -> String {
    let sorted = sort_keys(v);
    serde_json::to_string(&sorted).expect("json serialization must not fail")
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

/// Convenience for the common single-file case (no env-layer override).
pub fn load_single_yaml(path: impl AsRef<Path>) -> Result<LoadedConfig> {
    let path_str = path.as_ref().to_str().context("config path is not valid UTF-8")?;
    load_layered_yaml(&[path_str])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn loads_minimal_settings_with_default_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_file(&dir, "base.yaml", "persisted_state_root: /var/lib/aurora\n");

        let loaded = load_layered_yaml(&[&base]).unwrap();
        assert_eq!(loaded.settings.persisted_state_root, PathBuf::from("/var/lib/aurora"));
        assert_eq!(loaded.settings.log_level, "info");
        assert_eq!(loaded.settings.credentials_path, None);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_file(
            &dir,
            "base.yaml",
            "persisted_state_root: /var/lib/aurora\nlog_level: info\n",
        );
        let env = write_file(&dir, "env.yaml", "log_level: debug\n");

        let loaded = load_layered_yaml(&[&base, &env]).unwrap();
        assert_eq!(loaded.settings.log_level, "debug");
        assert_eq!(loaded.settings.persisted_state_root, PathBuf::from("/var/lib/aurora"));
    }

    #[test]
    fn hash_is_stable_for_identical_canonical_content() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.yaml", "persisted_state_root: /x\nlog_level: info\n");
        let b = write_file(&dir, "b.yaml", "log_level: info\npersisted_state_root: /x\n");

        let loaded_a = load_layered_yaml(&[&a]).unwrap();
        let loaded_b = load_layered_yaml(&[&b]).unwrap();
        assert_eq!(loaded_a.config_hash, loaded_b.config_hash);
    }
}
