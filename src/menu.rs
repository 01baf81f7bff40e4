//! Mobile navigation menu: a single open/closed flag mirrored into two CSS
//! classes (nav panel and body).

use crate::bus::ClickTarget;
use crate::config::ControlsConfig;
use crate::document::{ClassHost, DocumentAdapter};

#[derive(Debug, Clone)]
pub struct MenuController {
    open: bool,
    breakpoint: u32,
    nav_class: String,
    body_class: String,
}

impl MenuController {
    /// Returns `None` when the page lacks the toggle or the nav panel.
    pub fn init(doc: &impl DocumentAdapter, config: &ControlsConfig) -> Option<Self> {
        if !doc.has_menu() {
            tracing::debug!("Menu toggle or nav panel not found, menu controller disabled");
            return None;
        }
        Some(Self {
            open: false,
            breakpoint: config.breakpoint,
            nav_class: config.selectors.nav_open_class.clone(),
            body_class: config.selectors.body_open_class.clone(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button click. The click does not reach the document handler.
    pub fn toggle(&mut self, doc: &mut impl DocumentAdapter) {
        self.set_open(doc, !self.open);
    }

    /// Document-level click (bubbled, not from the toggle or panel handlers).
    pub fn document_click(&mut self, doc: &mut impl DocumentAdapter, target: ClickTarget) {
        match target {
            // Both stop propagation in the browser
            ClickTarget::MenuToggle | ClickTarget::MenuPanel => {}
            ClickTarget::Elsewhere if self.open => self.set_open(doc, false),
            ClickTarget::Elsewhere => {}
        }
    }

    /// Desktop layout never shows the collapsible menu.
    pub fn resized(&mut self, doc: &mut impl DocumentAdapter, width: u32) {
        if width > self.breakpoint {
            self.set_open(doc, false);
        }
    }

    fn set_open(&mut self, doc: &mut impl DocumentAdapter, open: bool) {
        if self.open != open {
            tracing::debug!("Menu {}", if open { "opened" } else { "closed" });
        }
        self.open = open;
        doc.set_class(ClassHost::Nav, &self.nav_class, open);
        doc.set_class(ClassHost::Body, &self.body_class, open);
    }
}
