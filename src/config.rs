use crate::error::{FunalyticsError, Result};
use crate::types::config::PolicyConfig;
use std::path::{Path, PathBuf};
use toml::Value;

pub const DEFAULT_POLICY_FILE: &str = "funalytics.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".funalytics/local.toml";
pub const DEFAULT_GLOBAL_POLICY_FILE: &str = ".config/funalytics/policy.toml";

/// Which layers contributed to a loaded policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySources {
    pub files: Vec<PathBuf>,
}

impl PolicySources {
    pub fn is_builtin(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn load_policy(root: &Path) -> Result<(PolicyConfig, PolicySources)> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_POLICY_FILE));
    load_policy_with_global(root, global.as_deref())
}

/// Built-in table, overlaid by global, repository and local files in that
/// order, then validated.
pub(crate) fn load_policy_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<(PolicyConfig, PolicySources)> {
    let mut merged = Value::try_from(PolicyConfig::default())?;
    let mut sources = PolicySources::default();

    let layers = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([root.join(DEFAULT_POLICY_FILE), root.join(DEFAULT_LOCAL_FILE)]);
    for path in layers {
        if merge_file_if_exists(&mut merged, &path)? {
            tracing::debug!(path = %path.display(), "merged policy layer");
            sources.files.push(path);
        }
    }

    let policy: PolicyConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| FunalyticsError::ConfigParse(e.to_string()))?;
    policy.validate()?;
    Ok((policy, sources))
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
        .map_err(|e| FunalyticsError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Tables merge key by key; anything else in `overlay` replaces the slot.
pub(crate) fn merge_toml(base: &mut Value, overlay: Value) {
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
