use crate::command::CommandRegistry;
use crate::error::AppError;
use crate::storage::{default_store_path, env_store_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "DUKE_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Extra keywords mapped to built-in commands, e.g. `"ls": "list"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<PathBuf>,
    pub aliases: BTreeMap<String, String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("duke").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("duke")
            .join(CONFIG_FILE_NAME))
    }
}

/// Never fails: a broken config falls back to defaults and carries the error.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::config(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content)
        .map_err(|err| AppError::config(format!("invalid JSON in {}: {}", path.display(), err)))
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(path) = overrides.store_path.as_ref() {
        merged.store_path = Some(path.clone());
    }

    for (alias, target) in overrides.aliases.iter() {
        merged.aliases.insert(alias.clone(), target.clone());
    }

    merged
}

/// Save file location: explicit flag, then `DUKE_STORE_PATH`, then the
/// config file, then the platform default.
pub fn resolve_store_path(explicit: Option<&Path>, config: &Config) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env_store_path() {
        return Ok(path);
    }
    if let Some(path) = config.store_path.as_ref() {
        return Ok(path.clone());
    }
    default_store_path()
}

/// Registers every configured alias, returning the ones that were rejected.
pub fn install_aliases(config: &Config, registry: &mut CommandRegistry) -> Vec<AppError> {
    let mut rejected = Vec::new();
    for (alias, target) in config.aliases.iter() {
        if let Err(err) = registry.add_alias(alias, target) {
            tracing::warn!(alias = %alias, error = %err, "ignoring alias");
            rejected.push(err);
        }
    }
    rejected
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, install_aliases, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides, resolve_store_path,
    };
    use crate::command::CommandRegistry;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_with_fallback_from_path(&dir.path().join("missing.json"));

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.map(|err| err.code()), Some("config_error"));
    }

    #[test]
    fn load_config_reads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let content = serde_json::json!({
            "store_path": "/tmp/duke/tasks.txt",
            "aliases": { "ls": "list" }
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();

        assert_eq!(
            loaded.store_path.as_deref(),
            Some(Path::new("/tmp/duke/tasks.txt"))
        );
        assert_eq!(loaded.aliases.get("ls").map(String::as_str), Some("list"));
    }

    #[test]
    fn merge_overrides_replaces_path_and_adds_aliases() {
        let base = Config {
            store_path: Some(PathBuf::from("base.txt")),
            aliases: [("ls".into(), "list".into())].into_iter().collect(),
        };
        let overrides = ConfigOverrides {
            store_path: Some(PathBuf::from("override.txt")),
            aliases: [("ls".into(), "find".into()), ("rm".into(), "delete".into())]
                .into_iter()
                .collect(),
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(merged.store_path, Some(PathBuf::from("override.txt")));
        assert_eq!(merged.aliases.get("ls").map(String::as_str), Some("find"));
        assert_eq!(merged.aliases.get("rm").map(String::as_str), Some("delete"));
        assert_eq!(base.aliases.get("ls").map(String::as_str), Some("list"));
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            store_path: None,
            aliases: [("ls".into(), "list".into())].into_iter().collect(),
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn explicit_store_path_wins() {
        let config = Config {
            store_path: Some(PathBuf::from("from-config.txt")),
            aliases: Default::default(),
        };

        let path = resolve_store_path(Some(Path::new("flag.txt")), &config).unwrap();

        assert_eq!(path, PathBuf::from("flag.txt"));
    }

    #[test]
    fn install_aliases_reports_bad_entries() {
        let config = Config {
            store_path: None,
            aliases: [
                ("ls".into(), "list".into()),
                ("boom".into(), "explode".into()),
            ]
            .into_iter()
            .collect(),
        };
        let mut registry = CommandRegistry::standard();

        let rejected = install_aliases(&config, &mut registry);

        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].message().contains("boom"));
        assert!(registry.lookup("ls").is_ok());
        assert!(registry.lookup("boom").is_err());
    }
}
