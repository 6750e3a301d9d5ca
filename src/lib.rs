//! # Tintage - theme preference and live age labels for web pages
//!
//! Tintage implements two small behaviors a server-rendered page needs on
//! the client side:
//!
//! - a tri-state theme preference (auto, light, dark) kept in browser storage
//!   and applied to the root element before first paint
//! - "time since" labels ("3 days") that re-render themselves, switching
//!   units as entries age and adjusting how often they refresh
//!
//! Both run against two small capabilities, [`Storage`] and [`Document`], so
//! the same logic runs in a browser (feature `web`), in a headless tool
//! (feature `cli`) or in tests against [`MemoryStorage`] and
//! [`MemoryDocument`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tintage::{Config, Document, MemoryDocument, MemoryStorage, Page, ThemePreference};
//!
//! let now = 1_700_000_000;
//! let page = Page::new(MemoryStorage::new(), MemoryDocument::new(), Config::default());
//! let label = page.document().add_age_element("age-hours", "data-ut", now - 90_000);
//!
//! page.on_script_load();
//! let next = page.on_dom_ready(now);
//!
//! assert_eq!(page.document().text(&label), "25 hours");
//! assert_eq!(page.document().class_name(&label), "age-hours");
//! assert_eq!(next, Duration::from_secs(300));
//!
//! assert_eq!(page.theme().cycle_theme(), ThemePreference::Light);
//! ```
//!
//! ## Storage failures
//!
//! Browser storage can throw (private mode, sandboxed frames, quota). The
//! theme controller never propagates those errors: a failed read means no
//! preference, a failed write still applies the theme for the session.
//!
//! ## Server side
//!
//! [`AgeMarkup`] produces the `<span class='age-…' data-ut='…'>` markup the
//! renderer refreshes, and [`register_filters`] exposes it to minijinja
//! templates as an `age` filter.

pub mod age;
pub mod config;
pub mod dom;
mod page;
pub mod storage;
pub mod theme;

#[cfg(feature = "web")]
pub mod web;

pub use age::{
    bucket_for, bucket_index, register_filters, AgeBucket, AgeLabel, AgeMarkup, AgeRenderer,
    MarkupError, BUCKETS, IDLE_REFRESH,
};
pub use config::{AgeSettings, Config, ConfigError, ThemeSettings};
pub use dom::{Document, ElementId, MemoryDocument};
pub use page::{now_unix, Page};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, UnavailableStorage};
pub use theme::{
    reset_theme_detector, set_theme_detector, ColorMode, ParseThemeError, ThemeController,
    ThemePreference,
};
