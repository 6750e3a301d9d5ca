//! Page lifecycle wiring.
//!
//! A page goes through three moments:
//!
//! 1. script load, before first paint: apply a stored theme so the page
//!    never flashes in the wrong colors
//! 2. DOM ready: sync the toggle label and run the first age sweep
//! 3. every timer expiry: run another sweep
//!
//! Steps 2 and 3 return the delay until the next sweep. The host arms a
//! single-shot timer with it; there is no fixed interval.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::age::AgeRenderer;
use crate::config::Config;
use crate::dom::Document;
use crate::storage::Storage;
use crate::theme::ThemeController;

/// The theme controller and age renderer sharing one document.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tintage::{Config, Document, MemoryDocument, MemoryStorage, Page};
///
/// let storage = MemoryStorage::with_entry("cgit-theme", "dark");
/// let page = Page::new(storage, MemoryDocument::new(), Config::default());
/// let toggle = page.document().add_element_with_id("theme-toggle");
///
/// page.on_script_load();
/// assert_eq!(page.document().root_attribute("data-theme").as_deref(), Some("dark"));
///
/// let next = page.on_dom_ready(1_700_000_000);
/// assert_eq!(page.document().text(&toggle), "dark");
/// assert_eq!(next, Duration::from_secs(86_400));
/// ```
#[derive(Debug)]
pub struct Page<S, D> {
    document: Rc<D>,
    theme: ThemeController<S, Rc<D>>,
    ages: AgeRenderer<Rc<D>>,
}

impl<S: Storage, D: Document> Page<S, D> {
    pub fn new(storage: S, document: D, config: Config) -> Self {
        let document = Rc::new(document);
        Self {
            theme: ThemeController::with_settings(storage, Rc::clone(&document), config.theme),
            ages: AgeRenderer::with_settings(Rc::clone(&document), config.age),
            document,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn theme(&self) -> &ThemeController<S, Rc<D>> {
        &self.theme
    }

    pub fn ages(&self) -> &AgeRenderer<Rc<D>> {
        &self.ages
    }

    /// Applies the stored theme. Run at script load.
    pub fn on_script_load(&self) {
        self.theme.init_theme();
    }

    /// Syncs the toggle label and runs the first sweep. Run on DOM ready.
    pub fn on_dom_ready(&self, now: i64) -> Duration {
        self.theme.update_theme_toggle();
        let next = self.ages.aging(now);
        debug!(next_secs = next.as_secs(), "page ready");
        next
    }

    /// Runs a scheduled sweep.
    pub fn tick(&self, now: i64) -> Duration {
        self.ages.aging(now)
    }
}

/// Current time in whole seconds since the Unix epoch, rounded.
pub fn now_unix() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    let secs = now.unix_timestamp();
    if now.millisecond() >= 500 {
        secs + 1
    } else {
        secs
    }
}
