use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{ClassHost, DocumentAdapter};
use crate::theme::{Icon, ResolvedTheme};

/// In-memory document used by tests and the replay CLI.
///
/// Every write is also recorded so callers can assert on history, not just
/// final state.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub theme_toggle_present: bool,
    pub menu_present: bool,
    pub prefers_dark: bool,
    /// Every value written to `data-theme`, oldest first
    pub theme_writes: Vec<String>,
    pub sun_visible: bool,
    pub moon_visible: bool,
    /// Every icon visibility change, oldest first
    pub icon_writes: Vec<(Icon, bool)>,
    /// Raw cookie strings, oldest first
    pub cookie_writes: Vec<String>,
    cookies: BTreeMap<String, String>,
    pub storage: HashMap<String, String>,
    pub nav_classes: BTreeSet<String>,
    pub body_classes: BTreeSet<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A page with every controlled element present and a light OS scheme
    pub fn new() -> Self {
        Self {
            theme_toggle_present: true,
            menu_present: true,
            prefers_dark: false,
            theme_writes: Vec::new(),
            // Both icons visible until the controller decides
            sun_visible: true,
            moon_visible: true,
            icon_writes: Vec::new(),
            cookie_writes: Vec::new(),
            cookies: BTreeMap::new(),
            storage: HashMap::new(),
            nav_classes: BTreeSet::new(),
            body_classes: BTreeSet::new(),
        }
    }

    /// A page without any of the controlled elements
    pub fn bare() -> Self {
        Self {
            theme_toggle_present: false,
            menu_present: false,
            ..Self::new()
        }
    }

    pub fn with_prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    /// Seed a cookie as if the server had set it
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_storage(mut self, key: &str, value: &str) -> Self {
        self.storage.insert(key.to_string(), value.to_string());
        self
    }

    /// Current value of `data-theme`
    pub fn theme_attribute(&self) -> Option<&str> {
        self.theme_writes.last().map(String::as_str)
    }

    pub fn icon_visible(&self, icon: Icon) -> bool {
        match icon {
            Icon::Sun => self.sun_visible,
            Icon::Moon => self.moon_visible,
        }
    }

    pub fn has_class(&self, host: ClassHost, class: &str) -> bool {
        match host {
            ClassHost::Nav => self.nav_classes.contains(class),
            ClassHost::Body => self.body_classes.contains(class),
        }
    }
}

impl DocumentAdapter for MemoryDocument {
    fn has_theme_toggle(&self) -> bool {
        self.theme_toggle_present
    }

    fn has_menu(&self) -> bool {
        self.menu_present
    }

    fn set_theme_attribute(&mut self, theme: ResolvedTheme) {
        self.theme_writes.push(theme.as_str().to_string());
    }

    fn set_icon_visible(&mut self, icon: Icon, visible: bool) {
        self.icon_writes.push((icon, visible));
        match icon {
            Icon::Sun => self.sun_visible = visible,
            Icon::Moon => self.moon_visible = visible,
        }
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn write_cookie(&mut self, cookie: &str) {
        self.cookie_writes.push(cookie.to_string());

        let mut parts = cookie.split(';').map(str::trim);
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let expired = parts.any(|attr| attr.eq_ignore_ascii_case("max-age=0"));
        if expired {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn storage_set(&mut self, key: &str, value: &str) {
        self.storage.insert(key.to_string(), value.to_string());
    }

    fn set_class(&mut self, host: ClassHost, class: &str, on: bool) {
        let classes = match host {
            ClassHost::Nav => &mut self.nav_classes,
            ClassHost::Body => &mut self.body_classes,
        };
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}
