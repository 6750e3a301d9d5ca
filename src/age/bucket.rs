//! Age buckets and label computation.

use std::fmt;

use serde::Serialize;

/// A named age range with its display unit and refresh cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    /// Class carried by elements in this bucket.
    pub class: &'static str,
    /// Unit appended to the displayed value.
    pub suffix: &'static str,
    /// Seconds per display unit.
    pub divisor: u64,
    /// Ages strictly below this many seconds fall in this bucket.
    /// `None` for the last bucket, which takes everything left.
    pub threshold: Option<u64>,
    /// Seconds until an element in this bucket needs re-rendering.
    pub refresh: u64,
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// The bucket table, finest to coarsest.
pub const BUCKETS: [AgeBucket; 6] = [
    AgeBucket {
        class: "age-mins",
        suffix: "min.",
        divisor: MINUTE,
        threshold: Some(7200),
        refresh: 10,
    },
    AgeBucket {
        class: "age-hours",
        suffix: "hours",
        divisor: HOUR,
        threshold: Some(24 * 7200),
        refresh: 5 * 60,
    },
    AgeBucket {
        class: "age-days",
        suffix: "days",
        divisor: DAY,
        threshold: Some(7 * 24 * 7200),
        refresh: 1800,
    },
    AgeBucket {
        class: "age-weeks",
        suffix: "weeks",
        divisor: WEEK,
        threshold: Some(30 * 24 * 7200),
        refresh: DAY,
    },
    AgeBucket {
        class: "age-months",
        suffix: "months",
        divisor: MONTH,
        threshold: Some(365 * 25 * 7200),
        refresh: DAY,
    },
    AgeBucket {
        class: "age-years",
        suffix: "years",
        divisor: YEAR,
        threshold: None,
        refresh: DAY,
    },
];

/// Delay used when no element is on the page.
pub const IDLE_REFRESH: u64 = BUCKETS[BUCKETS.len() - 1].refresh;

impl AgeBucket {
    /// Whether an age of `age` seconds falls below this bucket's threshold.
    pub fn contains(&self, age: u64) -> bool {
        self.threshold.map_or(true, |limit| age < limit)
    }

    /// Finds the bucket table entry carrying `class`.
    pub fn by_class(class: &str) -> Option<&'static AgeBucket> {
        BUCKETS.iter().find(|b| b.class == class)
    }
}

/// Returns the index of the first bucket whose threshold exceeds `age`.
pub fn bucket_index(age: u64) -> usize {
    let n = BUCKETS
        .iter()
        .position(|b| b.contains(age))
        .unwrap_or(BUCKETS.len());
    // The last bucket is unbounded; clamp anyway.
    n.min(BUCKETS.len() - 1)
}

/// Returns the bucket an age of `age` seconds falls in.
pub fn bucket_for(age: u64) -> &'static AgeBucket {
    &BUCKETS[bucket_index(age)]
}

/// A rendered age: the bucket plus the rounded value in its unit.
///
/// ```rust
/// use tintage::AgeLabel;
///
/// let label = AgeLabel::new(125);
/// assert_eq!(label.to_string(), "2 min.");
/// assert_eq!(label.class(), "age-mins");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeLabel {
    pub bucket: &'static AgeBucket,
    pub value: u64,
}

impl AgeLabel {
    /// Computes the label for an age in seconds.
    pub fn new(age: u64) -> Self {
        let bucket = bucket_for(age);
        Self {
            bucket,
            value: round_div(age, bucket.divisor),
        }
    }

    pub fn class(&self) -> &'static str {
        self.bucket.class
    }
}

impl fmt::Display for AgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.bucket.suffix)
    }
}

/// Integer division rounding halves up.
fn round_div(n: u64, d: u64) -> u64 {
    n / d + u64::from(n % d >= d - d / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let thresholds: Vec<_> = BUCKETS.iter().map(|b| b.threshold).collect();
        assert_eq!(
            thresholds,
            vec![
                Some(7200),
                Some(172_800),
                Some(1_209_600),
                Some(5_184_000),
                Some(65_700_000),
                None
            ]
        );

        let refresh: Vec<_> = BUCKETS.iter().map(|b| b.refresh).collect();
        assert_eq!(refresh, vec![10, 300, 1800, 86_400, 86_400, 86_400]);

        let divisors: Vec<_> = BUCKETS.iter().map(|b| b.divisor).collect();
        assert_eq!(
            divisors,
            vec![60, 3600, 86_400, 604_800, 2_592_000, 31_536_000]
        );
        assert_eq!(IDLE_REFRESH, 86_400);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket_index(0), 0);
        assert_eq!(bucket_index(7199), 0);
        assert_eq!(bucket_index(7200), 1);
        assert_eq!(bucket_index(172_799), 1);
        assert_eq!(bucket_index(172_800), 2);
        assert_eq!(bucket_index(1_209_600), 3);
        assert_eq!(bucket_index(5_184_000), 4);
        assert_eq!(bucket_index(65_700_000), 5);
        assert_eq!(bucket_index(u64::MAX), 5);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AgeLabel::new(125).to_string(), "2 min.");
        assert_eq!(AgeLabel::new(90_000).to_string(), "25 hours");
        assert_eq!(AgeLabel::new(90_000).class(), "age-hours");
        assert_eq!(AgeLabel::new(70_000_000).to_string(), "2 years");
        assert_eq!(AgeLabel::new(70_000_000).class(), "age-years");
        assert_eq!(AgeLabel::new(0).to_string(), "0 min.");
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round_div(29, 60), 0);
        assert_eq!(round_div(30, 60), 1);
        assert_eq!(round_div(89, 60), 1);
        assert_eq!(round_div(90, 60), 2);
        assert_eq!(round_div(7, 1), 7);
    }

    #[test]
    fn test_by_class() {
        assert_eq!(AgeBucket::by_class("age-days").map(|b| b.divisor), Some(86_400));
        assert!(AgeBucket::by_class("age-decades").is_none());
    }
}
