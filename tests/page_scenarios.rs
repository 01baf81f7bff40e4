//! End-to-end page scenarios driven through the event bus and the in-memory
//! document.

use theme_controls::bus::{create_bus, ClickTarget, UiEvent};
use theme_controls::config::{ControlsConfig, PersistenceMode};
use theme_controls::document::{ClassHost, MemoryDocument};
use theme_controls::page::Page;
use theme_controls::replay::{replay, Scenario};
use theme_controls::theme::{Icon, ThemePreference};

fn ready(doc: MemoryDocument, config: ControlsConfig) -> Page<MemoryDocument> {
    let mut page = Page::new(doc, config);
    page.handle(&UiEvent::Ready);
    page
}

fn local_storage_config() -> ControlsConfig {
    ControlsConfig {
        persistence: PersistenceMode::LocalStorage,
        ..ControlsConfig::default()
    }
}

fn menu_closed(doc: &MemoryDocument) -> bool {
    !doc.has_class(ClassHost::Nav, "active") && !doc.has_class(ClassHost::Body, "menu-open")
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn toggle_from_light_goes_dark_and_writes_cookie() {
    let mut page = ready(
        MemoryDocument::new().with_cookie("theme", "light"),
        ControlsConfig::default(),
    );
    assert_eq!(page.document().theme_attribute(), Some("light"));

    page.handle(&UiEvent::ThemeToggleClicked);

    let doc = page.document();
    assert_eq!(doc.theme_attribute(), Some("dark"));
    assert!(doc.icon_visible(Icon::Moon));
    assert!(!doc.icon_visible(Icon::Sun));
    assert_eq!(
        doc.cookie_writes.last().map(String::as_str),
        Some("theme=dark; path=/; max-age=31536000")
    );
}

#[test]
fn three_clicks_return_to_start() {
    for start in ["light", "dark", "system"] {
        let mut page = ready(
            MemoryDocument::new().with_cookie("theme", start),
            ControlsConfig::default(),
        );
        let initial = page.theme().map(|t| t.preference());
        for _ in 0..3 {
            page.handle(&UiEvent::ThemeToggleClicked);
        }
        assert_eq!(page.theme().map(|t| t.preference()), initial, "start {start}");
    }
}

#[test]
fn malformed_local_storage_defaults_to_system() {
    let page = ready(
        MemoryDocument::new()
            .with_prefers_dark(true)
            .with_storage("settings", "{\"theme\": "),
        local_storage_config(),
    );
    assert_eq!(
        page.theme().map(|t| t.preference()),
        Some(ThemePreference::System)
    );
    assert_eq!(page.document().theme_attribute(), Some("dark"));
}

#[test]
fn local_storage_mode_never_writes_cookie() {
    let mut page = ready(MemoryDocument::new(), local_storage_config());
    page.handle(&UiEvent::ThemeToggleClicked);

    let doc = page.document();
    assert!(doc.cookie_writes.is_empty());
    assert_eq!(doc.storage["settings"], r#"{"theme":"light"}"#);
}

#[test]
fn server_confirmation_wins_over_optimistic_click() {
    let bus = create_bus();
    let mut rx = bus.subscribe();
    let mut page = Page::new(
        MemoryDocument::new().with_cookie("theme", "light"),
        ControlsConfig::default(),
    );

    bus.publish(UiEvent::Ready);
    bus.publish(UiEvent::ThemeToggleClicked);
    // Server cycled from the dark cookie written by the click and answered
    // system; its answer replaces the local guess
    bus.publish(UiEvent::ThemeChanged {
        theme: ThemePreference::System,
    });
    page.drain(&mut rx);

    let theme = page.theme().unwrap();
    assert_eq!(theme.preference(), ThemePreference::System);
    assert_eq!(theme.pending(), None);
    assert_eq!(page.document().theme_attribute(), Some("light"));
    // Only the optimistic click persisted
    assert_eq!(page.document().cookie_writes.len(), 1);
}

#[test]
fn os_change_only_followed_in_system_mode() {
    let scenario = Scenario::from_json(
        r#"{
            "cookies": {"theme": "light"},
            "events": [
                {"type": "Ready"},
                {"type": "ColorSchemeChanged", "payload": {"prefers_dark": true}}
            ]
        }"#,
    )
    .unwrap();
    let report = replay(&scenario, ControlsConfig::default());
    assert_eq!(report.data_theme.as_deref(), Some("light"));

    let scenario = Scenario::from_json(
        r#"{
            "events": [
                {"type": "Ready"},
                {"type": "ColorSchemeChanged", "payload": {"prefers_dark": true}},
                {"type": "ColorSchemeChanged", "payload": {"prefers_dark": false}}
            ]
        }"#,
    )
    .unwrap();
    let report = replay(&scenario, ControlsConfig::default());
    assert_eq!(report.data_theme.as_deref(), Some("light"));
    assert!(report.sun_visible);
    assert!(!report.moon_visible);
}

// =============================================================================
// Menu
// =============================================================================

#[test]
fn resize_to_desktop_closes_open_menu() {
    let mut page = ready(MemoryDocument::new(), ControlsConfig::default());
    page.handle(&UiEvent::MenuToggleClicked);
    assert!(page.document().has_class(ClassHost::Nav, "active"));
    assert!(page.document().has_class(ClassHost::Body, "menu-open"));

    page.handle(&UiEvent::Resized { width: 1024 });
    assert!(menu_closed(page.document()));
    assert_eq!(page.menu().map(|m| m.is_open()), Some(false));
}

#[test]
fn outside_click_closes_inside_click_keeps_open() {
    let mut page = ready(MemoryDocument::new(), ControlsConfig::default());
    page.handle(&UiEvent::Resized { width: 600 });
    page.handle(&UiEvent::MenuToggleClicked);

    page.handle(&UiEvent::DocumentClicked {
        target: ClickTarget::MenuPanel,
    });
    assert_eq!(page.menu().map(|m| m.is_open()), Some(true));

    page.handle(&UiEvent::DocumentClicked {
        target: ClickTarget::Elsewhere,
    });
    assert_eq!(page.menu().map(|m| m.is_open()), Some(false));
    assert!(menu_closed(page.document()));
}

#[test]
fn custom_breakpoint_from_config() {
    let config = ControlsConfig::from_json(r#"{"breakpoint": 1100}"#).unwrap();
    let mut page = ready(MemoryDocument::new(), config);
    page.handle(&UiEvent::MenuToggleClicked);

    page.handle(&UiEvent::Resized { width: 1024 });
    assert_eq!(page.menu().map(|m| m.is_open()), Some(true));

    page.handle(&UiEvent::Resized { width: 1101 });
    assert_eq!(page.menu().map(|m| m.is_open()), Some(false));
}

#[test]
fn menu_without_nav_panel_is_inert_but_theme_works() {
    let mut doc = MemoryDocument::new();
    doc.menu_present = false;
    let mut page = ready(doc, ControlsConfig::default());

    page.handle(&UiEvent::MenuToggleClicked);
    page.handle(&UiEvent::ThemeToggleClicked);

    assert!(page.menu().is_none());
    assert!(menu_closed(page.document()));
    assert_eq!(page.document().theme_attribute(), Some("light"));
}
