//! Document adapter: the only seam between the controllers and the page.
//!
//! Controllers never touch the DOM directly. The browser implementation lives
//! in [`web`] (wasm32 only); [`MemoryDocument`] backs tests and the replay CLI.

mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::MemoryDocument;

use crate::theme::{Icon, ResolvedTheme};

/// Elements whose class list the menu controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassHost {
    Nav,
    Body,
}

/// Operations the controllers need from a document.
///
/// Writes are infallible from the caller's point of view: an implementation
/// that hits a browser error logs it and carries on.
pub trait DocumentAdapter {
    /// Whether the theme toggle button exists on this page
    fn has_theme_toggle(&self) -> bool;

    /// Whether both the menu toggle and the nav panel exist on this page
    fn has_menu(&self) -> bool;

    /// Write the styling hook (`data-theme` on the root element)
    fn set_theme_attribute(&mut self, theme: ResolvedTheme);

    fn set_icon_visible(&mut self, icon: Icon, visible: bool);

    /// Current `(prefers-color-scheme: dark)` state
    fn prefers_dark(&self) -> bool;

    /// Value of the named cookie, if present
    fn cookie(&self, name: &str) -> Option<String>;

    /// Store a full cookie string (`name=value; path=/; max-age=...`)
    fn write_cookie(&mut self, cookie: &str);

    fn storage_get(&self, key: &str) -> Option<String>;

    fn storage_set(&mut self, key: &str, value: &str);

    fn set_class(&mut self, host: ClassHost, class: &str, on: bool);
}
