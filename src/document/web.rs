//! Browser implementation of [`DocumentAdapter`] on top of web-sys.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, HtmlElement, MediaQueryList, Node, Storage};

use super::{ClassHost, DocumentAdapter};
use crate::bus::ClickTarget;
use crate::config::ControlsConfig;
use crate::persist::cookie_value;
use crate::theme::{Icon, ResolvedTheme};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("{op} failed: {message}")]
    Js { op: &'static str, message: String },
}

impl DomError {
    fn js(op: &'static str) -> impl FnOnce(JsValue) -> DomError {
        move |value| DomError::Js {
            op,
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        }
    }
}

/// Elements listeners are attached to
#[derive(Clone)]
pub struct ListenerTargets {
    pub theme_toggle: Option<Element>,
    pub menu_toggle: Option<Element>,
    pub nav: Option<Element>,
    pub media: Option<MediaQueryList>,
}

impl ListenerTargets {
    /// Classify a document-level click target
    pub fn classify(&self, target: Option<&Node>) -> ClickTarget {
        let inside = |el: &Option<Element>| el.as_ref().is_some_and(|el| el.contains(target));
        if inside(&self.menu_toggle) {
            ClickTarget::MenuToggle
        } else if inside(&self.nav) {
            ClickTarget::MenuPanel
        } else {
            ClickTarget::Elsewhere
        }
    }
}

pub struct WebDocument {
    document: HtmlDocument,
    root: Element,
    body: Option<HtmlElement>,
    sun_icon: Option<HtmlElement>,
    moon_icon: Option<HtmlElement>,
    storage: Option<Storage>,
    targets: ListenerTargets,
}

impl WebDocument {
    pub fn from_window(config: &ControlsConfig) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window
            .document()
            .ok_or(DomError::NoDocument)?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| DomError::NoDocument)?;
        let root = document.document_element().ok_or(DomError::NoDocument)?;
        let selectors = &config.selectors;

        let theme_toggle = document
            .query_selector(&selectors.theme_toggle)
            .map_err(DomError::js("query theme toggle"))?;
        let icon = |selector: &str| -> Result<Option<HtmlElement>, DomError> {
            let Some(toggle) = theme_toggle.as_ref() else {
                return Ok(None);
            };
            Ok(toggle
                .query_selector(selector)
                .map_err(DomError::js("query icon"))?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
        };
        let sun_icon = icon(&selectors.sun_icon)?;
        let moon_icon = icon(&selectors.moon_icon)?;

        let menu_toggle = document
            .query_selector(&selectors.menu_toggle)
            .map_err(DomError::js("query menu toggle"))?;
        let nav = document
            .query_selector(&selectors.nav)
            .map_err(DomError::js("query nav"))?;

        let media = window
            .match_media(DARK_SCHEME_QUERY)
            .map_err(DomError::js("matchMedia"))?;

        // Storage access throws when disabled by privacy settings
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("{}", DomError::js("localStorage")(e));
                None
            }
        };

        Ok(Self {
            body: document.body(),
            document,
            root,
            sun_icon,
            moon_icon,
            storage,
            targets: ListenerTargets {
                theme_toggle,
                menu_toggle,
                nav,
                media,
            },
        })
    }

    pub fn targets(&self) -> ListenerTargets {
        self.targets.clone()
    }

    fn icon(&self, icon: Icon) -> Option<&HtmlElement> {
        match icon {
            Icon::Sun => self.sun_icon.as_ref(),
            Icon::Moon => self.moon_icon.as_ref(),
        }
    }
}

fn warn_on_err(result: Result<(), DomError>) {
    if let Err(e) = result {
        tracing::warn!("{}", e);
    }
}

impl DocumentAdapter for WebDocument {
    fn has_theme_toggle(&self) -> bool {
        self.targets.theme_toggle.is_some()
    }

    fn has_menu(&self) -> bool {
        self.targets.menu_toggle.is_some() && self.targets.nav.is_some()
    }

    fn set_theme_attribute(&mut self, theme: ResolvedTheme) {
        warn_on_err(
            self.root
                .set_attribute(THEME_ATTRIBUTE, theme.as_str())
                .map_err(DomError::js("set data-theme")),
        );
    }

    fn set_icon_visible(&mut self, icon: Icon, visible: bool) {
        let Some(el) = self.icon(icon) else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        warn_on_err(
            el.style()
                .set_property("display", display)
                .map_err(DomError::js("set icon display")),
        );
    }

    fn prefers_dark(&self) -> bool {
        self.targets.media.as_ref().is_some_and(|m| m.matches())
    }

    fn cookie(&self, name: &str) -> Option<String> {
        match self.document.cookie() {
            Ok(jar) => cookie_value(&jar, name).map(str::to_string),
            Err(e) => {
                tracing::warn!("{}", DomError::js("read cookie")(e));
                None
            }
        }
    }

    fn write_cookie(&mut self, cookie: &str) {
        warn_on_err(
            self.document
                .set_cookie(cookie)
                .map_err(DomError::js("write cookie")),
        );
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}", DomError::js("localStorage.getItem")(e));
                None
            }
        }
    }

    fn storage_set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            tracing::warn!("localStorage unavailable, preference not saved");
            return;
        };
        warn_on_err(
            storage
                .set_item(key, value)
                .map_err(DomError::js("localStorage.setItem")),
        );
    }

    fn set_class(&mut self, host: ClassHost, class: &str, on: bool) {
        let el: Option<&Element> = match host {
            ClassHost::Nav => self.targets.nav.as_ref(),
            ClassHost::Body => self.body.as_deref(),
        };
        let Some(el) = el else {
            return;
        };
        warn_on_err(
            el.class_list()
                .toggle_with_force(class, on)
                .map(|_| ())
                .map_err(DomError::js("toggle class")),
        );
    }
}
