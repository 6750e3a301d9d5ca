//! Reading, applying and cycling the persisted theme.

use tracing::debug;

use super::adaptive::ColorMode;
use super::preference::ThemePreference;
use crate::config::ThemeSettings;
use crate::dom::Document;
use crate::storage::Storage;

/// Applies a persisted theme preference to a document.
///
/// Storage failures never escape: a failed read means "no preference" and a
/// failed write still leaves the page visually themed for the session.
///
/// # Example
///
/// ```rust
/// use tintage::{MemoryDocument, MemoryStorage, ThemeController, ThemePreference};
///
/// let storage = MemoryStorage::new();
/// let doc = MemoryDocument::new();
/// let theme = ThemeController::new(&storage, &doc);
///
/// theme.set_theme(ThemePreference::Dark);
/// assert_eq!(theme.current_theme(), ThemePreference::Dark);
/// assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("dark"));
///
/// assert_eq!(theme.cycle_theme(), ThemePreference::Auto);
/// assert_eq!(doc.root_attribute("data-theme"), None);
/// ```
#[derive(Debug)]
pub struct ThemeController<S, D> {
    storage: S,
    document: D,
    settings: ThemeSettings,
}

impl<S: Storage, D: Document> ThemeController<S, D> {
    /// Creates a controller using the default identifiers.
    pub fn new(storage: S, document: D) -> Self {
        Self::with_settings(storage, document, ThemeSettings::default())
    }

    /// Creates a controller with explicit identifiers.
    pub fn with_settings(storage: S, document: D, settings: ThemeSettings) -> Self {
        Self {
            storage,
            document,
            settings,
        }
    }

    pub fn settings(&self) -> &ThemeSettings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Returns the persisted preference, if any.
    ///
    /// Only `light` and `dark` count as persisted; anything else under the
    /// key, or a failing store, reads as no preference.
    pub fn stored_theme(&self) -> Option<ThemePreference> {
        let key = &self.settings.storage_key;
        let raw = match self.storage.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!(key = %key, error = %e, "theme storage read failed");
                return None;
            }
        };

        match raw.parse::<ThemePreference>() {
            Ok(theme) if theme.is_persisted() => Some(theme),
            _ => {
                debug!(key = %key, value = %raw, "ignoring unrecognized stored theme");
                None
            }
        }
    }

    /// Returns the stored preference, or `Auto` when there is none.
    pub fn current_theme(&self) -> ThemePreference {
        self.stored_theme().unwrap_or(ThemePreference::Auto)
    }

    /// Applies and persists `theme`, then refreshes the toggle label.
    pub fn set_theme(&self, theme: ThemePreference) {
        let key = &self.settings.storage_key;
        if theme.is_persisted() {
            self.document
                .set_root_attribute(&self.settings.attribute, theme.as_str());
            if let Err(e) = self.storage.set(key, theme.as_str()) {
                debug!(key = %key, theme = %theme, error = %e, "theme not persisted");
            }
        } else {
            self.document.remove_root_attribute(&self.settings.attribute);
            if let Err(e) = self.storage.remove(key) {
                debug!(key = %key, error = %e, "stored theme not cleared");
            }
        }
        self.update_theme_toggle();
    }

    /// Advances to the next preference in auto, light, dark order and
    /// returns the one applied.
    pub fn cycle_theme(&self) -> ThemePreference {
        let next = self.current_theme().next();
        self.set_theme(next);
        next
    }

    /// Writes the current preference name into the toggle control, if present.
    pub fn update_theme_toggle(&self) {
        if let Some(toggle) = self.document.element_by_id(&self.settings.toggle_id) {
            self.document
                .set_text(&toggle, self.current_theme().as_str());
        }
    }

    /// Applies a stored preference to the root element.
    ///
    /// Meant to run before the document is fully parsed, so it leaves the
    /// toggle control alone.
    pub fn init_theme(&self) {
        if let Some(theme) = self.stored_theme() {
            self.document
                .set_root_attribute(&self.settings.attribute, theme.as_str());
        }
    }

    /// Returns the concrete mode the page is shown in.
    pub fn color_mode(&self) -> ColorMode {
        self.current_theme().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::storage::{MemoryStorage, UnavailableStorage};

    const KEY: &str = "cgit-theme";
    const ATTR: &str = "data-theme";

    #[test]
    fn test_stored_theme_absent() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(&storage, &doc);

        assert_eq!(theme.stored_theme(), None);
        assert_eq!(theme.current_theme(), ThemePreference::Auto);
    }

    #[test]
    fn test_stored_theme_ignores_garbage_and_literal_auto() {
        let doc = MemoryDocument::new();

        let storage = MemoryStorage::with_entry(KEY, "solarized");
        assert_eq!(ThemeController::new(&storage, &doc).stored_theme(), None);

        let storage = MemoryStorage::with_entry(KEY, "auto");
        assert_eq!(ThemeController::new(&storage, &doc).stored_theme(), None);
    }

    #[test]
    fn test_set_theme_round_trip() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(&storage, &doc);

        for choice in [ThemePreference::Light, ThemePreference::Dark] {
            theme.set_theme(choice);
            assert_eq!(theme.current_theme(), choice);
            assert_eq!(storage.peek(KEY).as_deref(), Some(choice.as_str()));
            assert_eq!(doc.root_attribute(ATTR).as_deref(), Some(choice.as_str()));
        }

        theme.set_theme(ThemePreference::Auto);
        assert_eq!(theme.current_theme(), ThemePreference::Auto);
        assert!(!storage.contains(KEY));
        assert_eq!(doc.root_attribute(ATTR), None);
    }

    #[test]
    fn test_cycle_visits_light_dark_auto() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(&storage, &doc);

        let visited: Vec<_> = (0..3).map(|_| theme.cycle_theme()).collect();
        assert_eq!(
            visited,
            vec![
                ThemePreference::Light,
                ThemePreference::Dark,
                ThemePreference::Auto
            ]
        );
    }

    #[test]
    fn test_cycle_from_unrecognized_value_goes_to_light() {
        let storage = MemoryStorage::with_entry(KEY, "sepia");
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(&storage, &doc);

        assert_eq!(theme.cycle_theme(), ThemePreference::Light);
        assert_eq!(storage.peek(KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_failing_storage_still_applies_attribute() {
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(UnavailableStorage, &doc);

        assert_eq!(theme.current_theme(), ThemePreference::Auto);

        theme.set_theme(ThemePreference::Dark);
        assert_eq!(doc.root_attribute(ATTR).as_deref(), Some("dark"));
        // Nothing was persisted, so the preference still reads as auto.
        assert_eq!(theme.current_theme(), ThemePreference::Auto);
    }

    #[test]
    fn test_failing_storage_auto_clears_attribute() {
        let doc = MemoryDocument::new();
        doc.set_root_attribute(ATTR, "light");
        let theme = ThemeController::new(UnavailableStorage, &doc);

        theme.set_theme(ThemePreference::Auto);
        assert_eq!(doc.root_attribute(ATTR), None);
    }

    #[test]
    fn test_set_theme_updates_toggle() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let toggle = doc.add_element_with_id("theme-toggle");
        let theme = ThemeController::new(&storage, &doc);

        theme.set_theme(ThemePreference::Light);
        assert_eq!(doc.text(&toggle), "light");

        theme.set_theme(ThemePreference::Auto);
        assert_eq!(doc.text(&toggle), "auto");
    }

    #[test]
    fn test_toggle_shows_auto_when_write_failed() {
        let doc = MemoryDocument::new();
        let toggle = doc.add_element_with_id("theme-toggle");
        let theme = ThemeController::new(UnavailableStorage, &doc);

        theme.set_theme(ThemePreference::Dark);
        assert_eq!(doc.text(&toggle), "auto");
    }

    #[test]
    fn test_update_toggle_without_control_is_noop() {
        let storage = MemoryStorage::with_entry(KEY, "dark");
        let doc = MemoryDocument::new();
        let theme = ThemeController::new(&storage, &doc);

        theme.update_theme_toggle();
        assert_eq!(doc.writes(), 0);
    }

    #[test]
    fn test_init_theme_applies_stored_without_touching_toggle() {
        let storage = MemoryStorage::with_entry(KEY, "dark");
        let doc = MemoryDocument::new();
        let toggle = doc.add_element_with_id("theme-toggle");
        let theme = ThemeController::new(&storage, &doc);

        theme.init_theme();

        assert_eq!(doc.root_attribute(ATTR).as_deref(), Some("dark"));
        assert_eq!(doc.text(&toggle), "");
    }

    #[test]
    fn test_init_theme_without_preference_leaves_root_alone() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        ThemeController::new(&storage, &doc).init_theme();
        assert_eq!(doc.root_attribute(ATTR), None);
    }

    #[test]
    fn test_custom_settings() {
        let storage = MemoryStorage::new();
        let doc = MemoryDocument::new();
        let settings = ThemeSettings {
            storage_key: "site-theme".to_string(),
            attribute: "data-mode".to_string(),
            toggle_id: "mode".to_string(),
        };
        let theme = ThemeController::with_settings(&storage, &doc, settings);

        theme.set_theme(ThemePreference::Dark);
        assert_eq!(storage.peek("site-theme").as_deref(), Some("dark"));
        assert_eq!(doc.root_attribute("data-mode").as_deref(), Some("dark"));
        assert_eq!(doc.root_attribute(ATTR), None);
    }
}
