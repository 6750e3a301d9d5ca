//! Persisted theme preference.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: auto, light or dark
//! - [`ThemeController`]: reads, applies, persists and cycles the preference
//! - [`ColorMode`]: the concrete light/dark mode a preference resolves to
//! - [`set_theme_detector`]: replaces the OS query used to resolve `auto`
//!
//! `auto` is stored as the absence of the storage key, so the root element
//! carries a theme attribute only for an explicit light or dark choice.

mod adaptive;
mod controller;
mod preference;

pub use adaptive::{reset_theme_detector, set_theme_detector, ColorMode};
pub use controller::ThemeController;
pub use preference::{ParseThemeError, ThemePreference};
