//! Periodic re-rendering of age labels.

use std::time::Duration;

use tracing::{debug, trace};

use super::bucket::{AgeLabel, BUCKETS, IDLE_REFRESH};
use crate::config::AgeSettings;
use crate::dom::Document;

/// Re-renders "time since" labels in a document.
///
/// Each element carries a bucket class and an absolute Unix timestamp
/// attribute. A sweep recomputes every label from the timestamp, moves
/// elements between buckets as they age, and reports how long to wait
/// before the next sweep. Scheduling is left to the caller.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tintage::{AgeRenderer, Document, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let el = doc.add_age_element("age-mins", "data-ut", 1_000_000 - 125);
///
/// let ages = AgeRenderer::new(&doc);
/// let next = ages.aging(1_000_000);
///
/// assert_eq!(doc.text(&el), "2 min.");
/// assert_eq!(next, Duration::from_secs(10));
/// ```
#[derive(Debug)]
pub struct AgeRenderer<D> {
    document: D,
    settings: AgeSettings,
}

impl<D: Document> AgeRenderer<D> {
    /// Creates a renderer reading the default timestamp attribute.
    pub fn new(document: D) -> Self {
        Self::with_settings(document, AgeSettings::default())
    }

    pub fn with_settings(document: D, settings: AgeSettings) -> Self {
        Self { document, settings }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Brings one element's text and class in line with `age`.
    ///
    /// Each of the two is written only when it differs from what the element
    /// already shows. Returns whether anything was written.
    pub fn render_age(&self, element: &D::Element, age: u64) -> bool {
        let label = AgeLabel::new(age);
        let text = label.to_string();
        let mut wrote = false;

        if self.document.text(element) != text {
            self.document.set_text(element, &text);
            wrote = true;
        }
        if self.document.class_name(element) != label.class() {
            self.document.set_class_name(element, label.class());
            wrote = true;
        }
        wrote
    }

    /// Runs one sweep at `now` (Unix seconds) and returns the delay until
    /// the next one.
    ///
    /// The delay is the shortest refresh interval among buckets that had at
    /// least one element when queried, or the coarsest bucket's interval on
    /// an empty page.
    pub fn aging(&self, now: i64) -> Duration {
        let mut next = IDLE_REFRESH;
        let mut seen = 0usize;
        let mut updated = 0usize;

        for bucket in BUCKETS.iter() {
            let elements = self.document.elements_by_class(bucket.class);
            if elements.is_empty() {
                continue;
            }
            next = next.min(bucket.refresh);

            for element in &elements {
                let Some(timestamp) = self.timestamp(element) else {
                    continue;
                };
                seen += 1;
                let age = now.saturating_sub(timestamp).max(0) as u64;
                if self.render_age(element, age) {
                    updated += 1;
                }
            }
        }

        trace!(seen, updated, next_secs = next, "age sweep done");
        Duration::from_secs(next)
    }

    fn timestamp(&self, element: &D::Element) -> Option<i64> {
        let attribute = &self.settings.timestamp_attribute;
        let Some(raw) = self.document.attribute(element, attribute) else {
            debug!(attribute = %attribute, "age element without timestamp");
            return None;
        };
        match raw.trim().parse::<i64>() {
            Ok(ts) => Some(ts),
            Err(_) => {
                debug!(attribute = %attribute, value = %raw, "age element with invalid timestamp");
                None
            }
        }
    }
}
