//! Browser backends and the script entry point.
//!
//! Build for `wasm32-unknown-unknown` with the `web` feature and load the
//! module from the page `<head>`. The start function applies the stored
//! theme right away, then waits for `DOMContentLoaded` to sync the toggle
//! and start the age sweep loop. The toggle's click handler calls the
//! exported `cycle_theme`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::Config;
use crate::dom::Document;
use crate::page::Page;
use crate::storage::{Storage, StorageError};
use crate::theme::ThemePreference;

/// `window.localStorage`.
///
/// The store is looked up on every call: browsers may throw on access
/// itself, not only on reads and writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn store(&self) -> Result<web_sys::Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is null".to_string()))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(describe(&e)))
    }
}

/// The live `window.document`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    /// Returns the current window's document, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn ready_state(&self) -> String {
        self.document.ready_state()
    }
}

impl Document for BrowserDocument {
    type Element = web_sys::Element;

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn remove_root_attribute(&self, name: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.remove_attribute(name);
        }
    }

    fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<web_sys::Element> {
        // getElementsByClassName is live; copy it out before anything is
        // re-classified.
        let live = self.document.get_elements_by_class_name(class);
        (0..live.length()).filter_map(|i| live.item(i)).collect()
    }

    fn attribute(&self, element: &web_sys::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn text(&self, element: &web_sys::Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &web_sys::Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn class_name(&self, element: &web_sys::Element) -> String {
        element.class_name()
    }

    fn set_class_name(&self, element: &web_sys::Element, class: &str) {
        element.set_class_name(class);
    }
}

type WebPage = Page<LocalStorage, BrowserDocument>;

thread_local! {
    static PAGE: RefCell<Option<Rc<WebPage>>> = const { RefCell::new(None) };
}

/// Script entry point.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = BrowserDocument::current() else {
        return;
    };
    let page = Rc::new(Page::new(LocalStorage, document, Config::default()));
    page.on_script_load();
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));

    if page.document().ready_state() != "loading" {
        dom_ready(page);
        return;
    }

    let target = page.document().document.clone();
    let ready = Rc::clone(&page);
    let callback = Closure::once_into_js(move || dom_ready(ready));
    if let Err(e) =
        target.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        warn!(error = %describe(&e), "could not listen for DOMContentLoaded");
    }
}

/// Advances the theme preference. Bound to the toggle control's click.
#[wasm_bindgen]
pub fn cycle_theme() -> String {
    PAGE.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|page| page.theme().cycle_theme())
            .unwrap_or(ThemePreference::Auto)
            .to_string()
    })
}

fn dom_ready(page: Rc<WebPage>) {
    let next = page.on_dom_ready(js_now());
    schedule(page, next);
}

fn schedule(page: Rc<WebPage>, delay: Duration) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let callback = Closure::once_into_js(move || {
        let next = page.tick(js_now());
        schedule(page, next);
    });
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        warn!(error = %describe(&e), "could not schedule age sweep");
    }
}

fn js_now() -> i64 {
    (js_sys::Date::now() / 1000.0).round() as i64
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
