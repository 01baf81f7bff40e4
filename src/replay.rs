//! Scenario replay against an in-memory document.
//!
//! A scenario describes the page as the server rendered it (cookies, storage,
//! OS scheme, which elements exist) plus the events a user produced. Replaying
//! it yields the final document state.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bus::{create_bus, UiEvent};
use crate::config::ControlsConfig;
use crate::document::MemoryDocument;
use crate::page::Page;
use crate::theme::ThemePreference;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub prefers_dark: bool,
    pub theme_toggle: bool,
    pub menu: bool,
    pub cookies: BTreeMap<String, String>,
    pub storage: BTreeMap<String, String>,
    pub events: Vec<UiEvent>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            prefers_dark: false,
            theme_toggle: true,
            menu: true,
            cookies: BTreeMap::new(),
            storage: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario JSON")
    }

    fn document(&self) -> MemoryDocument {
        let mut doc = MemoryDocument::new().with_prefers_dark(self.prefers_dark);
        doc.theme_toggle_present = self.theme_toggle;
        doc.menu_present = self.menu;
        for (name, value) in &self.cookies {
            doc = doc.with_cookie(name, value);
        }
        for (key, value) in &self.storage {
            doc = doc.with_storage(key, value);
        }
        doc
    }
}

/// Final page state after a replay
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub events_handled: usize,
    pub data_theme: Option<String>,
    pub preference: Option<ThemePreference>,
    pub sun_visible: bool,
    pub moon_visible: bool,
    pub cookie_writes: Vec<String>,
    pub storage: BTreeMap<String, String>,
    pub menu_open: Option<bool>,
    pub nav_classes: Vec<String>,
    pub body_classes: Vec<String>,
}

pub fn replay(scenario: &Scenario, config: ControlsConfig) -> Report {
    let bus = create_bus();
    let mut rx = bus.subscribe();
    let mut page = Page::new(scenario.document(), config);

    if scenario.events.first() != Some(&UiEvent::Ready) {
        tracing::debug!("Scenario does not start with Ready, inserting it");
        bus.publish(UiEvent::Ready);
    }

    let mut handled = page.drain(&mut rx);
    for event in &scenario.events {
        // The browser's media query list reflects the new scheme before the
        // change event fires
        if let UiEvent::ColorSchemeChanged { prefers_dark } = event {
            page.document_mut().prefers_dark = *prefers_dark;
        }
        bus.publish(event.clone());
        handled += page.drain(&mut rx);
    }

    let preference = page.theme().map(|t| t.preference());
    let menu_open = page.menu().map(|m| m.is_open());
    let doc = page.into_document();

    Report {
        events_handled: handled,
        data_theme: doc.theme_attribute().map(str::to_string),
        preference,
        sun_visible: doc.sun_visible,
        moon_visible: doc.moon_visible,
        cookie_writes: doc.cookie_writes,
        storage: doc.storage.into_iter().collect(),
        menu_open,
        nav_classes: doc.nav_classes.into_iter().collect(),
        body_classes: doc.body_classes.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_is_inserted() {
        let scenario = Scenario::from_json(r#"{"events":[{"type":"ThemeToggleClicked"}]}"#).unwrap();
        let report = replay(&scenario, ControlsConfig::default());
        assert_eq!(report.events_handled, 2);
        assert_eq!(report.preference, Some(ThemePreference::Light));
    }

    #[test]
    fn test_os_change_updates_document_before_handling() {
        let scenario = Scenario::from_json(
            r#"{"events":[{"type":"Ready"},{"type":"ColorSchemeChanged","payload":{"prefers_dark":true}}]}"#,
        )
        .unwrap();
        let report = replay(&scenario, ControlsConfig::default());
        assert_eq!(report.data_theme.as_deref(), Some("dark"));
        assert!(report.moon_visible);
        assert!(!report.sun_visible);
    }

    #[test]
    fn test_missing_elements() {
        let scenario = Scenario::from_json(
            r#"{"theme_toggle":false,"menu":false,"events":[{"type":"MenuToggleClicked"}]}"#,
        )
        .unwrap();
        let report = replay(&scenario, ControlsConfig::default());
        assert_eq!(report.preference, None);
        assert_eq!(report.menu_open, None);
        assert_eq!(report.data_theme, None);
    }

    #[test]
    fn test_unknown_event_type_is_error() {
        assert!(Scenario::from_json(r#"{"events":[{"type":"Scrolled"}]}"#).is_err());
    }
}
