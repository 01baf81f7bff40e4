//! Theme controller: owns the active preference and reflects it onto the page.
//!
//! Clicks are applied optimistically and persisted straight away. A later
//! `themeChanged` confirmation from the server always wins over the local
//! guess and is applied without persisting again.

use crate::document::DocumentAdapter;
use crate::persist::Persistence;
use crate::theme::{cycle_theme, Icon, ResolvedTheme, ThemePreference};

#[derive(Debug, Clone)]
pub struct ThemeController {
    preference: ThemePreference,
    /// Last optimistic value still waiting for a server confirmation
    pending: Option<ThemePreference>,
    persistence: Persistence,
}

impl ThemeController {
    /// Read the stored preference and apply it before anything else can run.
    /// Returns `None` when the page has no theme toggle.
    pub fn init(doc: &mut impl DocumentAdapter, persistence: Persistence) -> Option<Self> {
        if !doc.has_theme_toggle() {
            tracing::debug!("Theme toggle not found, theme controller disabled");
            return None;
        }

        let preference = persistence.load(doc);
        let controller = Self {
            preference,
            pending: None,
            persistence,
        };
        let resolved = controller.reflect(doc, preference);
        tracing::debug!("Initial theme {} (rendered {})", preference, resolved);
        Some(controller)
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn pending(&self) -> Option<ThemePreference> {
        self.pending
    }

    /// Make `pref` the active preference, reflect it and persist it.
    pub fn apply_theme(&mut self, doc: &mut impl DocumentAdapter, pref: ThemePreference) {
        self.preference = pref;
        self.reflect(doc, pref);
        self.persistence.save(doc, pref);
    }

    /// Toggle click: cycle from the stored preference (not the rendered
    /// attribute, which never says "system").
    pub fn toggle(&mut self, doc: &mut impl DocumentAdapter) -> ThemePreference {
        let next = cycle_theme(Some(self.preference));
        tracing::debug!("Theme toggle {} -> {}", self.preference, next);
        self.apply_theme(doc, next);
        self.pending = Some(next);
        next
    }

    /// Server confirmed a preference. Already persisted server-side.
    pub fn reconcile(&mut self, doc: &mut impl DocumentAdapter, confirmed: ThemePreference) {
        match self.pending.take() {
            Some(guess) if guess != confirmed => {
                tracing::warn!(
                    "Server confirmed theme {} but {} was applied locally, using server value",
                    confirmed,
                    guess
                );
            }
            Some(_) => tracing::debug!("Server confirmed theme {}", confirmed),
            None => tracing::debug!("Server pushed theme {}", confirmed),
        }
        self.preference = confirmed;
        self.reflect(doc, confirmed);
    }

    /// OS colour scheme flipped. Only matters while following the OS.
    pub fn os_scheme_changed(&mut self, doc: &mut impl DocumentAdapter) {
        if !self.preference.follows_os() {
            return;
        }
        let resolved = self.reflect(doc, self.preference);
        tracing::debug!("OS colour scheme changed, rendering {}", resolved);
    }

    /// Write the styling hook and icons for `pref`. No persistence.
    fn reflect(&self, doc: &mut impl DocumentAdapter, pref: ThemePreference) -> ResolvedTheme {
        let resolved = pref.resolve(doc.prefers_dark());
        doc.set_theme_attribute(resolved);
        update_icons(doc, resolved);
        resolved
    }
}

/// Exactly one icon visible: hide both, then show the one for `resolved`.
fn update_icons(doc: &mut impl DocumentAdapter, resolved: ResolvedTheme) {
    for icon in Icon::BOTH {
        doc.set_icon_visible(icon, false);
    }
    doc.set_icon_visible(resolved.icon(), true);
}
