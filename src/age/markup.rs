//! Server-side markup for age labels.
//!
//! Pages emit each age as a `<span>` that already shows the right label and
//! carries the bucket class plus the absolute timestamp. The client-side
//! sweep then keeps it fresh. Both sides share the bucket table and the
//! rounding in [`AgeLabel`], so a freshly rendered page needs no writes on
//! its first sweep.

use std::sync::Arc;

use minijinja::{context, Environment, ErrorKind, Value};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::bucket::AgeLabel;

const AGE_SPAN: &str =
    "<span class='{{ class }}' data-ut='{{ ut }}' title='{{ title }}'>{{ label }}</span>";
const DATE_SPAN: &str = "<span title='{{ title }}'>{{ date }}</span>";

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);
const SHORT_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Error rendering age markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("timestamp out of range: {0}")]
    Timestamp(#[from] time::error::ComponentRange),

    #[error("date formatting failed: {0}")]
    Format(#[from] time::error::Format),
}

/// Renders age spans.
///
/// # Example
///
/// ```rust
/// use tintage::AgeMarkup;
///
/// let markup = AgeMarkup::new().unwrap();
/// let html = markup.span(1_000_000, 1_000_125, None).unwrap();
/// assert!(html.starts_with("<span class='age-mins' data-ut='1000000'"));
/// assert!(html.ends_with(">2 min.</span>"));
/// ```
#[derive(Debug)]
pub struct AgeMarkup {
    env: Environment<'static>,
    offset: UtcOffset,
}

impl AgeMarkup {
    /// Creates a renderer showing dates in UTC.
    pub fn new() -> Result<Self, MarkupError> {
        Self::with_offset(UtcOffset::UTC)
    }

    /// Creates a renderer showing dates at a fixed UTC offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn with_offset(offset: UtcOffset) -> Result<Self, MarkupError> {
        let mut env = Environment::new();
        // The .html names turn on HTML auto-escaping.
        env.add_template("age.html", AGE_SPAN)?;
        env.add_template("date.html", DATE_SPAN)?;
        Ok(Self { env, offset })
    }

    /// Renders the markup for `timestamp` as seen at `now`.
    ///
    /// A zero timestamp renders nothing. When `max_relative` is set and the
    /// age exceeds it, an absolute date is shown instead of a live label.
    pub fn span(
        &self,
        timestamp: i64,
        now: i64,
        max_relative: Option<i64>,
    ) -> Result<String, MarkupError> {
        if timestamp == 0 {
            return Ok(String::new());
        }

        let age = now.saturating_sub(timestamp).max(0);
        let when = OffsetDateTime::from_unix_timestamp(timestamp)?.to_offset(self.offset);
        let title = when.format(ISO_DATE)?;

        if matches!(max_relative, Some(max) if max >= 0 && age > max) {
            let date = when.format(SHORT_DATE)?;
            let tmpl = self.env.get_template("date.html")?;
            return Ok(tmpl.render(context! { title, date })?);
        }

        let label = AgeLabel::new(age as u64);
        let tmpl = self.env.get_template("age.html")?;
        Ok(tmpl.render(context! {
            class => label.class(),
            ut => timestamp,
            title,
            label => label.to_string(),
        })?)
    }
}

/// Registers the `age` filter on a minijinja environment.
///
/// `{{ ts | age }}` renders a live age span for a Unix timestamp as seen at
/// `now`; `{{ ts | age(1209600) }}` falls back to an absolute date past two
/// weeks.
pub fn register_filters(env: &mut Environment<'static>, markup: AgeMarkup, now: i64) {
    let markup = Arc::new(markup);
    env.add_filter(
        "age",
        move |timestamp: i64, max_relative: Option<i64>| -> Result<Value, minijinja::Error> {
            markup
                .span(timestamp, now, max_relative)
                .map(Value::from_safe_string)
                .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-14 22:13:20 UTC
    const TS: i64 = 1_700_000_000;

    #[test]
    fn test_span_relative() {
        let html = AgeMarkup::new().unwrap().span(TS, TS + 90_000, None).unwrap();
        assert_eq!(
            html,
            "<span class='age-hours' data-ut='1700000000' \
             title='2023-11-14 22:13:20 +0000'>25 hours</span>"
        );
    }

    #[test]
    fn test_span_zero_timestamp_is_empty() {
        assert_eq!(AgeMarkup::new().unwrap().span(0, TS, None).unwrap(), "");
    }

    #[test]
    fn test_span_future_timestamp_clamps_to_zero() {
        let html = AgeMarkup::new().unwrap().span(TS, TS - 500, None).unwrap();
        assert!(html.contains("class='age-mins'"));
        assert!(html.ends_with(">0 min.</span>"));
    }

    #[test]
    fn test_span_absolute_past_max_relative() {
        let two_weeks = 14 * 86_400;
        let html = AgeMarkup::new()
            .unwrap()
            .span(TS, TS + two_weeks + 1, Some(two_weeks))
            .unwrap();
        assert_eq!(
            html,
            "<span title='2023-11-14 22:13:20 +0000'>2023-11-14</span>"
        );
    }

    #[test]
    fn test_span_at_max_relative_stays_relative() {
        let two_weeks = 14 * 86_400;
        let html = AgeMarkup::new()
            .unwrap()
            .span(TS, TS + two_weeks, Some(two_weeks))
            .unwrap();
        assert!(html.contains("class='age-weeks'"));
        assert!(html.ends_with(">2 weeks</span>"));
    }

    #[test]
    fn test_span_negative_max_relative_is_ignored() {
        let html = AgeMarkup::new().unwrap().span(TS, TS + 125, Some(-1)).unwrap();
        assert!(html.contains("class='age-mins'"));
    }

    #[test]
    fn test_span_with_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let html = AgeMarkup::with_offset(offset)
            .unwrap()
            .span(TS, TS + 60, None)
            .unwrap();
        assert!(html.contains("title='2023-11-15 00:13:20 +0200'"));
    }

    #[test]
    fn test_age_filter() {
        let mut env = Environment::new();
        register_filters(&mut env, AgeMarkup::new().unwrap(), TS + 125);
        env.add_template("row.html", "<td>{{ ts | age }}</td>")
            .unwrap();

        let out = env
            .get_template("row.html")
            .unwrap()
            .render(context! { ts => TS })
            .unwrap();
        assert!(out.starts_with("<td><span class='age-mins'"));
        assert!(out.ends_with(">2 min.</span></td>"));
    }

    #[test]
    fn test_age_filter_with_max_relative() {
        let mut env = Environment::new();
        register_filters(&mut env, AgeMarkup::new().unwrap(), TS + 30 * 86_400);
        env.add_template("row.html", "{{ ts | age(1209600) }}")
            .unwrap();

        let out = env
            .get_template("row.html")
            .unwrap()
            .render(context! { ts => TS })
            .unwrap();
        assert_eq!(out, "<span title='2023-11-14 22:13:20 +0000'>2023-11-14</span>");
    }
}
