use crate::error::{MirrorError, Result};
use crate::types::config::MirrorConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "mirror.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".mirror/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repo-mirror/config.toml";

pub fn load_config(root: &Path) -> Result<Option<MirrorConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Deep-merge global, repository and local layers in that order.
/// Returns `None` when none of the layers exist.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<MirrorConfig>> {
    let mut layers: Vec<PathBuf> = Vec::new();
    if let Some(path) = global_path {
        layers.push(path.to_path_buf());
    }
    layers.push(root.join(DEFAULT_CONFIG_FILE));
    layers.push(root.join(DEFAULT_LOCAL_FILE));

    let mut merged = Value::Table(Map::new());
    let mut found = false;
    for layer in &layers {
        found |= merge_file_if_exists(&mut merged, layer)?;
    }
    if !found {
        return Ok(None);
    }

    let cfg: MirrorConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| MirrorError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::debug!(layers = layers.len(), "loaded layered config");
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| MirrorError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
