use crate::commands::IdeaseedPaths;
use crate::error::{IdeaseedError, Result};
use crate::options::{canonical_key, RawFlags, RawValue, NONE_SENTINEL};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const SETTINGS_FILENAME: &str = "settings.json";
const AUTH_CACHE_FILENAME: &str = "auth.json";
const DEFAULT_PROJECT: &str = "{repository}";
const DEFAULT_COLUMN: &str = "To Do";

/// Settings holding a path, a name or a template.
const TEXT_KEYS: &[&str] = &[
    "auth_cache",
    "color",
    "default_column",
    "default_project",
    "default_user_column",
    "default_user_project",
    "github_api_url",
    "local_copy",
    "notes_endpoint",
    "user_keyword",
];

/// Settings holding true or false.
const FLAG_KEYS: &[&str] = &["create_missing", "no_auth_cache", "no_self_assign", "open"];

/// Persistent defaults, stored as a JSON object in `settings.json`.
///
/// Keys are canonicalized on load, so `"--default-project"` and
/// `"default_project"` are the same setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    /// Load settings from the given file, or return empty settings if not found
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: BTreeMap<String, Value> = serde_json::from_str(&content).map_err(|e| {
            IdeaseedError::Config(format!("{} is not a JSON object: {e}", path.display()))
        })?;
        let values = raw
            .into_iter()
            .map(|(key, value)| (canonical_key(&key), value))
            .collect();
        Ok(Self { values })
    }

    /// Save settings to the given file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn is_known_key(key: &str) -> bool {
        TEXT_KEYS.contains(&key) || FLAG_KEYS.contains(&key)
    }

    pub fn keys() -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = TEXT_KEYS.iter().chain(FLAG_KEYS).copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(&canonical_key(key)).map(display_value)
    }

    /// Stores a value. `"<None>"` is kept verbatim so that it turns the
    /// setting off instead of falling back to the built-in default.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let key = canonical_key(key);
        let value = if FLAG_KEYS.contains(&key.as_str()) {
            match value.to_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" => Value::Bool(false),
                _ => return Err(format!("{key} must be true or false, got {value:?}")),
            }
        } else if TEXT_KEYS.contains(&key.as_str()) {
            Value::String(value.to_string())
        } else {
            return Err(format!(
                "Unknown config key: {key}. Known keys are: {}",
                Self::keys().join(", ")
            ));
        };
        self.values.insert(key, value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value)))
    }

    /// The settings as a flag source, ranked below the command line.
    pub fn to_raw_flags(&self) -> RawFlags {
        let mut flags = RawFlags::new();
        for (key, value) in &self.values {
            let value = match value {
                Value::Null => RawValue::Absent,
                Value::Bool(on) => RawValue::Flag(*on),
                Value::String(text) => RawValue::Text(text.clone()),
                Value::Array(items) => {
                    RawValue::List(items.iter().map(display_value).collect())
                }
                other => RawValue::Text(other.to_string()),
            };
            flags.push(key.clone(), value);
        }
        flags
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(Value::String(text)) if !text.is_empty() && text != NONE_SENTINEL => {
                Some(text.clone())
            }
            _ => None,
        }
    }

    /// GraphQL endpoint of the notes service.
    pub fn notes_endpoint(&self) -> Option<String> {
        self.text("notes_endpoint")
    }

    pub fn github_api_url(&self) -> String {
        self.text("github_api_url")
            .unwrap_or_else(|| crate::backend::github::DEFAULT_API_URL.to_string())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn builtin_entries(paths: &IdeaseedPaths) -> Vec<(&'static str, RawValue)> {
    vec![
        ("default_project", DEFAULT_PROJECT.into()),
        ("default_column", DEFAULT_COLUMN.into()),
        ("default_user_column", DEFAULT_COLUMN.into()),
        ("auth_cache", Some(paths.auth_cache.clone()).into()),
    ]
}

impl Settings {
    /// Settings followed by the built-in defaults they do not mention. A
    /// setting stored as `"<None>"` therefore turns its feature off.
    pub fn layered_flags(&self, paths: &IdeaseedPaths) -> RawFlags {
        let mut flags = self.to_raw_flags();
        for (key, value) in builtin_entries(paths) {
            if !self.values.contains_key(key) {
                flags.push(key, value);
            }
        }
        flags
    }
}

/// Platform locations for settings and cached credentials.
pub fn default_paths() -> Result<IdeaseedPaths> {
    let dirs = ProjectDirs::from("", "", "ideaseed").ok_or_else(|| {
        IdeaseedError::Config("Could not determine the config directory".to_string())
    })?;
    Ok(IdeaseedPaths {
        settings: dirs.config_dir().join(SETTINGS_FILENAME),
        auth_cache: dirs.cache_dir().join(AUTH_CACHE_FILENAME),
    })
}
