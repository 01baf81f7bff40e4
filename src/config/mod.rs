//! Configuration management

use anyhow::{Context, Result};
use serde::Deserialize;

/// Width above which the collapsible menu is never shown
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

/// One year, in seconds
pub const DEFAULT_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// Environment prefix for native overrides (THEME_BREAKPOINT, THEME_SELECTORS__NAV, ...)
const ENV_PREFIX: &str = "THEME";

/// Where the theme preference is persisted. Exactly one store is authoritative
/// for a given page; the controller never writes both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// `theme=<pref>` cookie, readable by the server for first-paint rendering
    #[default]
    Cookie,
    /// JSON settings object in local storage
    LocalStorage,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub breakpoint: u32,
    pub persistence: PersistenceMode,
    pub storage_key: String,
    pub cookie_name: String,
    pub cookie_max_age: u64,
    pub selectors: Selectors,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT_PX,
            persistence: PersistenceMode::default(),
            storage_key: "settings".to_string(),
            cookie_name: "theme".to_string(),
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE,
            selectors: Selectors::default(),
        }
    }
}

/// CSS selectors used to locate the controlled elements
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle: String,
    /// Looked up inside the theme toggle
    pub sun_icon: String,
    /// Looked up inside the theme toggle
    pub moon_icon: String,
    pub menu_toggle: String,
    pub nav: String,
    /// Class toggled on the nav panel while the menu is open
    pub nav_open_class: String,
    /// Class toggled on `<body>` while the menu is open
    pub body_open_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: "#theme-toggle".to_string(),
            sun_icon: ".sun-icon".to_string(),
            moon_icon: ".moon-icon".to_string(),
            menu_toggle: ".menu-toggle".to_string(),
            nav: ".nav-links".to_string(),
            nav_open_class: "active".to_string(),
            body_open_class: "menu-open".to_string(),
        }
    }
}

impl ControlsConfig {
    /// Layer a JSON document over the defaults. Unknown keys are ignored,
    /// missing keys keep their default.
    pub fn from_json(json: &str) -> Result<Self> {
        ::config::Config::builder()
            .add_source(::config::File::from_str(json, ::config::FileFormat::Json))
            .build()
            .context("invalid controls config")?
            .try_deserialize()
            .context("controls config has unexpected value types")
    }
}

/// Load configuration for native tools: defaults, then the optional JSON file,
/// then `THEME_` environment variables.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config(path: Option<&std::path::Path>) -> Result<ControlsConfig> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = path {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        builder = builder.add_source(::config::File::from_str(
            &contents,
            ::config::FileFormat::Json,
        ));
    }

    let config: ControlsConfig = builder
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    tracing::debug!(
        "Controls config loaded: breakpoint={} persistence={:?}",
        config.breakpoint,
        config.persistence
    );
    Ok(config)
}
