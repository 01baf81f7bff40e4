//! Page runtime - routes bus events to the theme and menu controllers.
//!
//! The page is the single owner of controller state. Listeners only publish
//! [`UiEvent`]s; everything is applied here, one event at a time, in bus order.

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::bus::UiEvent;
use crate::config::ControlsConfig;
use crate::document::DocumentAdapter;
use crate::menu::MenuController;
use crate::persist::Persistence;
use crate::theme_controller::ThemeController;

pub struct Page<D: DocumentAdapter> {
    doc: D,
    config: ControlsConfig,
    ready: bool,
    theme: Option<ThemeController>,
    menu: Option<MenuController>,
}

impl<D: DocumentAdapter> Page<D> {
    /// Nothing is touched until [`UiEvent::Ready`] arrives.
    pub fn new(doc: D, config: ControlsConfig) -> Self {
        Self {
            doc,
            config,
            ready: false,
            theme: None,
            menu: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn menu(&self) -> Option<&MenuController> {
        self.menu.as_ref()
    }

    pub fn handle(&mut self, event: &UiEvent) {
        if !self.ready && *event != UiEvent::Ready {
            tracing::debug!("Ignoring {} before ready", event.kind());
            return;
        }

        match event {
            UiEvent::Ready => self.on_ready(),
            UiEvent::ThemeToggleClicked => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.toggle(&mut self.doc);
                }
            }
            UiEvent::ThemeChanged { theme: confirmed } => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.reconcile(&mut self.doc, *confirmed);
                }
            }
            UiEvent::ColorSchemeChanged { prefers_dark } => {
                tracing::debug!("OS prefers dark: {}", prefers_dark);
                if let Some(theme) = self.theme.as_mut() {
                    theme.os_scheme_changed(&mut self.doc);
                }
            }
            UiEvent::MenuToggleClicked => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle(&mut self.doc);
                }
            }
            UiEvent::DocumentClicked { target } => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.document_click(&mut self.doc, *target);
                }
            }
            UiEvent::Resized { width } => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.resized(&mut self.doc, *width);
                }
            }
        }
    }

    /// Apply every event currently queued on `rx`. Returns how many were handled.
    pub fn drain(&mut self, rx: &mut broadcast::Receiver<UiEvent>) -> usize {
        let mut handled = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    self.handle(&event);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Page fell behind, {} events dropped", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        handled
    }

    fn on_ready(&mut self) {
        if self.ready {
            tracing::debug!("Duplicate ready event ignored");
            return;
        }
        self.ready = true;
        self.theme = ThemeController::init(&mut self.doc, Persistence::from_config(&self.config));
        self.menu = MenuController::init(&self.doc, &self.config);
        tracing::info!(
            "Page controls ready (theme: {}, menu: {})",
            self.theme.is_some(),
            self.menu.is_some()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{create_bus, ClickTarget};
    use crate::document::MemoryDocument;
    use crate::theme::ThemePreference;

    fn ready_page(doc: MemoryDocument) -> Page<MemoryDocument> {
        let mut page = Page::new(doc, ControlsConfig::default());
        page.handle(&UiEvent::Ready);
        page
    }

    #[test]
    fn test_events_before_ready_are_ignored() {
        let mut page = Page::new(MemoryDocument::new(), ControlsConfig::default());
        page.handle(&UiEvent::ThemeToggleClicked);
        page.handle(&UiEvent::MenuToggleClicked);
        assert!(!page.is_ready());
        assert!(page.theme().is_none());
        assert!(page.document().theme_writes.is_empty());
        assert!(page.document().nav_classes.is_empty());
    }

    #[test]
    fn test_ready_applies_before_first_toggle() {
        let bus = create_bus();
        let mut rx = bus.subscribe();
        let mut page = Page::new(
            MemoryDocument::new().with_cookie("theme", "dark"),
            ControlsConfig::default(),
        );

        bus.publish(UiEvent::Ready);
        bus.publish(UiEvent::ThemeToggleClicked);
        assert_eq!(page.drain(&mut rx), 2);

        assert_eq!(page.document().theme_writes, vec!["dark", "light"]);
        assert_eq!(
            page.theme().map(|t| t.preference()),
            Some(ThemePreference::System)
        );
    }

    #[test]
    fn test_duplicate_ready_does_not_reinitialize() {
        let mut page = ready_page(MemoryDocument::new());
        page.handle(&UiEvent::ThemeToggleClicked);
        page.handle(&UiEvent::Ready);
        assert_eq!(
            page.theme().map(|t| t.preference()),
            Some(ThemePreference::Light)
        );
    }

    #[test]
    fn test_bare_page_survives_every_event() {
        let mut page = ready_page(MemoryDocument::bare());
        for event in [
            UiEvent::ThemeToggleClicked,
            UiEvent::ThemeChanged {
                theme: ThemePreference::Dark,
            },
            UiEvent::ColorSchemeChanged { prefers_dark: true },
            UiEvent::MenuToggleClicked,
            UiEvent::DocumentClicked {
                target: ClickTarget::Elsewhere,
            },
            UiEvent::Resized { width: 1024 },
        ] {
            page.handle(&event);
        }
        assert!(page.theme().is_none());
        assert!(page.menu().is_none());
        assert!(page.document().theme_writes.is_empty());
    }

    #[test]
    fn test_theme_and_menu_are_independent() {
        let mut page = ready_page(MemoryDocument::new());
        page.handle(&UiEvent::MenuToggleClicked);
        page.handle(&UiEvent::ThemeChanged {
            theme: ThemePreference::Dark,
        });
        assert_eq!(page.menu().map(|m| m.is_open()), Some(true));

        page.handle(&UiEvent::Resized { width: 1200 });
        assert_eq!(page.document().theme_attribute(), Some("dark"));
    }
}
