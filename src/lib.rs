//! Theme Controls - Rust Implementation
//!
//! Light/dark/system theme switching and the mobile navigation menu for
//! server-rendered pages, compiled to WebAssembly.
//!
//! This library provides:
//! - Theme preference resolution against the OS colour scheme
//! - Cookie or local-storage persistence of the preference
//! - Optimistic toggling reconciled with server `themeChanged` events
//! - Mobile menu open/close on click, outside click and resize
//! - An in-memory document for tests and scenario replay

pub mod bus;
pub mod config;
pub mod document;
pub mod menu;
pub mod page;
pub mod persist;
pub mod replay;
pub mod theme;
pub mod theme_controller;
#[cfg(target_arch = "wasm32")]
pub mod web;
