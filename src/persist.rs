//! Theme preference persistence (cookie or local-storage settings object).

use serde::{Deserialize, Serialize};

use crate::config::{ControlsConfig, PersistenceMode};
use crate::document::DocumentAdapter;
use crate::theme::ThemePreference;

/// Local-storage settings object. Only `theme` is read; other keys belong to
/// the page and are left alone by [`Persistence::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    pub theme: ThemePreference,
}

impl StoredSettings {
    /// `None` for anything that is not a JSON object with a valid `theme`
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// `name=value; path=/; max-age=N`
pub fn format_cookie(name: &str, value: &str, max_age: u64) -> String {
    format!("{name}={value}; path=/; max-age={max_age}")
}

/// Find a cookie's value in a `document.cookie` style string (`a=1; b=2`).
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Reads and writes the preference through whichever store is configured.
#[derive(Debug, Clone)]
pub struct Persistence {
    mode: PersistenceMode,
    storage_key: String,
    cookie_name: String,
    cookie_max_age: u64,
}

impl Persistence {
    pub fn from_config(config: &ControlsConfig) -> Self {
        Self {
            mode: config.persistence,
            storage_key: config.storage_key.clone(),
            cookie_name: config.cookie_name.clone(),
            cookie_max_age: config.cookie_max_age,
        }
    }

    /// Stored preference, or `System` when absent or malformed
    pub fn load(&self, doc: &impl DocumentAdapter) -> ThemePreference {
        let loaded = match self.mode {
            PersistenceMode::Cookie => doc
                .cookie(&self.cookie_name)
                .and_then(|value| ThemePreference::from_name(&value)),
            PersistenceMode::LocalStorage => doc
                .storage_get(&self.storage_key)
                .and_then(|raw| StoredSettings::parse(&raw))
                .map(|settings| settings.theme),
        };

        match loaded {
            Some(pref) => pref,
            None => {
                tracing::debug!(
                    "No usable stored theme ({:?}), defaulting to system",
                    self.mode
                );
                ThemePreference::default()
            }
        }
    }

    pub fn save(&self, doc: &mut impl DocumentAdapter, pref: ThemePreference) {
        match self.mode {
            PersistenceMode::Cookie => {
                let cookie = format_cookie(&self.cookie_name, pref.as_str(), self.cookie_max_age);
                doc.write_cookie(&cookie);
            }
            PersistenceMode::LocalStorage => {
                // Rewrite only `theme`; other keys survive even if the old
                // theme value was invalid
                let mut settings = doc
                    .storage_get(&self.storage_key)
                    .and_then(|raw| {
                        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&raw)
                            .ok()
                    })
                    .unwrap_or_default();
                settings.insert(
                    "theme".to_string(),
                    serde_json::Value::String(pref.as_str().to_string()),
                );
                match serde_json::to_string(&settings) {
                    Ok(json) => doc.storage_set(&self.storage_key, &json),
                    Err(e) => tracing::warn!("Failed to serialize settings: {}", e),
                }
            }
        }
        tracing::debug!("Persisted theme preference {} ({:?})", pref, self.mode);
    }
}
