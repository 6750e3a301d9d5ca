//! Self-refreshing "time since" labels.
//!
//! This module provides:
//!
//! - [`BUCKETS`]: six [`AgeBucket`] records from minutes to years
//! - [`AgeLabel`]: the rounded value and unit for an age in seconds
//! - [`AgeRenderer`]: rewrites labels in a [`Document`](crate::Document) and
//!   reports when the next sweep is due
//! - [`AgeMarkup`]: emits the tagged `<span>` the renderer later refreshes
//!
//! Elements move between buckets as they age ("119 min." becomes "2 hours"),
//! so each sweep re-buckets every element and recomputes the next delay
//! from the buckets that are currently populated.

mod bucket;
mod markup;
mod renderer;

pub use bucket::{bucket_for, bucket_index, AgeBucket, AgeLabel, BUCKETS, IDLE_REFRESH};
pub use markup::{register_filters, AgeMarkup, MarkupError};
pub use renderer::AgeRenderer;
