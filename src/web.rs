//! WebAssembly entry point.
//!
//! Listeners translate DOM events into [`UiEvent`]s on the bus; a single
//! local task owns the [`Page`] and applies them in order.

use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Event, EventTarget, MediaQueryListEvent, Node};

use crate::bus::{create_bus, SharedBus, UiEvent};
use crate::config::ControlsConfig;
use crate::document::web::{ListenerTargets, WebDocument};
use crate::page::Page;
use crate::theme::ThemePreference;

/// Optional `<script type="application/json">` block holding a [`ControlsConfig`]
const CONFIG_ELEMENT_ID: &str = "theme-controls-config";

#[derive(Deserialize)]
struct ThemeChangedDetail {
    theme: String,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(|| {
            if let Err(e) = boot() {
                tracing::warn!("Page controls failed to start: {:?}", e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        boot()
    }
}

fn boot() -> Result<(), JsValue> {
    let config = page_config();
    let doc = WebDocument::from_window(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let targets = doc.targets();

    let bus = create_bus();
    let mut rx = bus.subscribe();
    let mut page = Page::new(doc, config);

    // Applied synchronously so first paint matches the stored preference and
    // no listener exists yet that could race it.
    page.handle(&UiEvent::Ready);

    register_listeners(&bus, &targets)?;

    wasm_bindgen_futures::spawn_local(async move {
        loop {
            match rx.recv().await {
                Ok(event) => page.handle(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Page fell behind, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    Ok(())
}

/// Config from the page, or defaults when absent or invalid
fn page_config() -> ControlsConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match json {
        Some(json) => ControlsConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid controls config: {:#}", e);
            ControlsConfig::default()
        }),
        None => ControlsConfig::default(),
    }
}

/// Attach a listener for the lifetime of the page
fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn register_listeners(bus: &SharedBus, targets: &ListenerTargets) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let Some(toggle) = &targets.theme_toggle {
        let clicks = bus.clone();
        listen(toggle, "click", move |_: Event| {
            clicks.publish(UiEvent::ThemeToggleClicked);
        })?;

        let confirmations = bus.clone();
        listen(&document, "themeChanged", move |e: CustomEvent| {
            match serde_wasm_bindgen::from_value::<ThemeChangedDetail>(e.detail()) {
                Ok(detail) => confirmations.publish(UiEvent::ThemeChanged {
                    theme: ThemePreference::parse(&detail.theme),
                }),
                Err(err) => tracing::warn!("themeChanged without usable detail: {}", err),
            }
        })?;

        if let Some(media) = &targets.media {
            let scheme_changes = bus.clone();
            listen(media, "change", move |e: MediaQueryListEvent| {
                scheme_changes.publish(UiEvent::ColorSchemeChanged {
                    prefers_dark: e.matches(),
                });
            })?;
        }
    }

    if let (Some(menu_toggle), Some(nav)) = (&targets.menu_toggle, &targets.nav) {
        let toggles = bus.clone();
        listen(menu_toggle, "click", move |e: Event| {
            e.stop_propagation();
            toggles.publish(UiEvent::MenuToggleClicked);
        })?;

        listen(nav, "click", |e: Event| e.stop_propagation())?;

        let clicks = bus.clone();
        let classify = targets.clone();
        listen(&document, "click", move |e: Event| {
            let node = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            clicks.publish(UiEvent::DocumentClicked {
                target: classify.classify(node.as_ref()),
            });
        })?;

        let resizes = bus.clone();
        let resize_window = window.clone();
        listen(&window, "resize", move |_: Event| {
            let width = resize_window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or_default();
            resizes.publish(UiEvent::Resized {
                width: width as u32,
            });
        })?;
    }

    Ok(())
}
