//! Event bus for page events
//!
//! Uses tokio::sync::broadcast for pub/sub pattern.
//! Browser listeners publish here; the page runtime is the consumer.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tokio::sync::broadcast;

use crate::theme::ThemePreference;

/// Where a document-level click landed, relative to the menu elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    MenuToggle,
    MenuPanel,
    Elsewhere,
}

/// Event types that can be published on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum UiEvent {
    /// Document finished loading
    Ready,

    // Theme events
    ThemeToggleClicked,
    /// Server confirmed a saved preference (`themeChanged` DOM event)
    ThemeChanged { theme: ThemePreference },
    /// `(prefers-color-scheme: dark)` flipped
    ColorSchemeChanged { prefers_dark: bool },

    // Menu events
    MenuToggleClicked,
    DocumentClicked { target: ClickTarget },
    Resized { width: u32 },
}

impl UiEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::Ready => "ready",
            UiEvent::ThemeToggleClicked => "theme_toggle_clicked",
            UiEvent::ThemeChanged { .. } => "theme_changed",
            UiEvent::ColorSchemeChanged { .. } => "color_scheme_changed",
            UiEvent::MenuToggleClicked => "menu_toggle_clicked",
            UiEvent::DocumentClicked { .. } => "document_clicked",
            UiEvent::Resized { .. } => "resized",
        }
    }
}

/// Event bus handle for publishing and subscribing
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: UiEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    /// Get the number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    /// Default capacity (64 events); a page never has more than a handful in flight
    fn default() -> Self {
        Self::new(64)
    }
}

/// Bus shared between listener closures on the UI thread
pub type SharedBus = Rc<EventBus>;

/// Create a new shared event bus
pub fn create_bus() -> SharedBus {
    Rc::new(EventBus::default())
}
