//! Configuration loading from disk and the environment.
//!
//! The loader searches an ordered list of directories for a config file,
//! merges it over the installed defaults, overlays environment variables,
//! and decodes the result into [`AppConfig`]. A file that is absent
//! everywhere is tolerated; a file that exists but cannot be read, parsed,
//! or decoded is a fatal error for the caller.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::config::defaults::Defaults;
use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file exists but is not valid TOML.
    #[error("failed to parse {path}: {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config file exists but is not valid YAML.
    #[error("failed to parse {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The merged values do not fit the typed configuration structure.
    #[error("failed to decode configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// An environment variable matched a config key but its value could not
    /// be coerced to the key's type.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParse { var: String, reason: String },

    /// Unknown configuration file format name.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Yaml,
    Toml,
}

impl FileFormat {
    /// File extensions probed during discovery, in order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFormat::Yaml => &["yaml", "yml"],
            FileFormat::Toml => &["toml"],
        }
    }
}

impl FromStr for FileFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Yaml => write!(f, "yaml"),
            FileFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Layered configuration loader.
///
/// Sources are merged in ascending priority: installed defaults, then the
/// first config file discovered in the search paths, then environment
/// variables.
#[derive(Debug)]
pub struct ConfigLoader {
    name: String,
    format: FileFormat,
    search_paths: Vec<PathBuf>,
    defaults: Defaults,
}

impl ConfigLoader {
    /// Create a loader for `<name>.<ext>` files of the given format.
    pub fn new(name: impl Into<String>, format: FileFormat) -> Self {
        Self {
            name: name.into(),
            format,
            search_paths: Vec::new(),
            defaults: Defaults::new(),
        }
    }

    /// Append a directory to the ordered search list.
    #[must_use]
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Append several directories to the ordered search list.
    #[must_use]
    pub fn search_paths<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Install fallback values.
    #[must_use]
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolve all layers into a typed configuration.
    ///
    /// A file missing from every search path is not an error; any other
    /// failure on a file that exists is.
    pub fn load(self) -> Result<AppConfig, ConfigError> {
        let mut tree = self.defaults.into_tree();

        match discover(&self.search_paths, &self.name, self.format) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration file");
                let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let mut document = parse_document(&content, self.format, &path)?;
                canonicalize(&mut document);
                merge(&mut tree, document);
            }
            None => {
                tracing::debug!(
                    name = %self.name,
                    format = %self.format,
                    "No configuration file found, using defaults and environment"
                );
            }
        }

        // Case-insensitive match: normalize variable names once up front.
        let env: HashMap<String, String> = std::env::vars()
            .map(|(key, value)| (key.to_uppercase(), value))
            .collect();
        overlay_env(&mut tree, "", &env)?;

        Ok(serde_json::from_value(tree)?)
    }
}

/// Convenience wrapper matching the common call shape: standard defaults
/// plus an ordered list of directories.
pub fn load_configuration(
    name: &str,
    format: FileFormat,
    search_paths: &[PathBuf],
) -> Result<AppConfig, ConfigError> {
    ConfigLoader::new(name, format)
        .search_paths(search_paths.iter().cloned())
        .defaults(Defaults::standard())
        .load()
}

fn discover(search_paths: &[PathBuf], name: &str, format: FileFormat) -> Option<PathBuf> {
    for dir in search_paths {
        for ext in format.extensions() {
            let candidate = dir.join(format!("{name}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

fn parse_document(content: &str, format: FileFormat, path: &Path) -> Result<Value, ConfigError> {
    let value = match format {
        FileFormat::Toml => {
            toml::from_str::<Value>(content).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?
        }
        FileFormat::Yaml => {
            serde_yaml::from_str::<Value>(content).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    // An empty file parses to null; treat it as an empty document.
    Ok(match value {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    })
}

/// Rewrite legacy top-level spellings (`API_NAME`, `Name`) to the canonical
/// field so they merge onto the same key as the default.
fn canonicalize(document: &mut Value) {
    if let Value::Object(map) = document {
        for legacy in ["API_NAME", "Name"] {
            if let Some(value) = map.remove(legacy) {
                map.entry("api_name".to_string()).or_insert(value);
            }
        }
    }
}

/// Deep-merge `overlay` into `base`. Objects merge per key; any other value
/// in the overlay replaces the base value outright.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Environment variable name for a dotted config key:
/// `server.bind_address` → `SERVER_BIND_ADDRESS`.
fn env_var_name(dotted: &str) -> String {
    dotted.to_uppercase().replace('.', "_")
}

/// Overlay environment variables onto every leaf of the tree. `env` must be
/// keyed by uppercase variable name.
fn overlay_env(value: &mut Value, path: &str, env: &HashMap<String, String>) -> Result<(), ConfigError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                overlay_env(child, &child_path, env)?;
            }
            Ok(())
        }
        leaf => {
            let var = env_var_name(path);
            if let Some(raw) = env.get(&var) {
                *leaf = coerce(raw, leaf).map_err(|reason| ConfigError::EnvParse { var, reason })?;
            }
            Ok(())
        }
    }
}

/// Coerce a raw environment value to the type already present at the key.
fn coerce(raw: &str, current: &Value) -> Result<Value, String> {
    match current {
        Value::Number(_) => {
            if let Ok(n) = raw.parse::<u64>() {
                Ok(Value::from(n))
            } else if let Ok(n) = raw.parse::<i64>() {
                Ok(Value::from(n))
            } else if let Ok(n) = raw.parse::<f64>() {
                Ok(Value::from(n))
            } else {
                Err(format!("expected number, got '{raw}'"))
            }
        }
        Value::Bool(_) => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| format!("expected boolean, got '{raw}'")),
        Value::String(_) | Value::Null => Ok(Value::String(raw.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err("cannot override a structured value".to_string())
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
