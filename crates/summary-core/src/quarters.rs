//! Calendar-quarter buckets anchored to January.
//!
//! Bucket boundaries fall on the 1st of January, April, July and October
//! regardless of where the data starts, so series computed from different
//! subsets of the same log line up bucket for bucket.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const MONTHS_PER_QUARTER: u32 = 3;

/// Half-open interval `[start, start + 3 months)`.
///
/// Ordering follows start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterBucket {
    year: i32,
    /// 1..=4
    quarter: u32,
}

impl QuarterBucket {
    /// Quarter `quarter` (1..=4) of `year`, or `None` if either is out of range.
    pub fn new(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, first_month(quarter), 1)?;
        Some(Self { year, quarter })
    }

    /// The bucket holding `ts`.
    pub fn containing(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            quarter: ts.month0() / MONTHS_PER_QUARTER + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    /// First instant of the bucket (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.start_date().and_time(NaiveTime::MIN)
    }

    /// First instant after the bucket (exclusive).
    pub fn end(&self) -> NaiveDateTime {
        self.next().start()
    }

    /// The bucket immediately following this one.
    pub fn next(&self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// Every bucket from `first` through `last`, both included, with no gaps.
    ///
    /// Empty when `last` precedes `first`.
    pub fn span(first: Self, last: Self) -> Vec<Self> {
        let mut buckets = Vec::new();
        let mut current = first;
        while current <= last {
            buckets.push(current);
            current = current.next();
        }
        buckets
    }

    /// Contiguous buckets covering every timestamp yielded by `timestamps`.
    pub fn covering(timestamps: impl IntoIterator<Item = NaiveDateTime>) -> Vec<Self> {
        let mut bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;
        for ts in timestamps {
            bounds = Some(match bounds {
                None => (ts, ts),
                Some((lo, hi)) => (lo.min(ts), hi.max(ts)),
            });
        }
        match bounds {
            Some((lo, hi)) => Self::span(Self::containing(lo), Self::containing(hi)),
            None => Vec::new(),
        }
    }

    fn start_date(&self) -> NaiveDate {
        // `new` and `containing` only admit years chrono can represent.
        NaiveDate::from_ymd_opt(self.year, first_month(self.quarter), 1).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for QuarterBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

fn first_month(quarter: u32) -> u32 {
    (quarter - 1) * MONTHS_PER_QUARTER + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn q(year: i32, quarter: u32) -> QuarterBucket {
        QuarterBucket::new(year, quarter).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range_quarter() {
        assert!(QuarterBucket::new(2001, 0).is_none());
        assert!(QuarterBucket::new(2001, 5).is_none());
        assert!(QuarterBucket::new(2001, 4).is_some());
    }

    #[test]
    fn test_containing_maps_months_to_quarters() {
        let expected = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
        for (month0, quarter) in expected.iter().enumerate() {
            let ts = at(2001, month0 as u32 + 1, 15, 0, 0, 0);
            assert_eq!(QuarterBucket::containing(ts), q(2001, *quarter));
        }
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let bucket = q(2001, 2);
        let containing = QuarterBucket::containing;
        assert_eq!(bucket.start(), at(2001, 4, 1, 0, 0, 0));
        assert_eq!(bucket.end(), at(2001, 7, 1, 0, 0, 0));
        assert_eq!(containing(at(2001, 4, 1, 0, 0, 0)), bucket);
        assert_eq!(containing(at(2001, 6, 30, 23, 59, 59)), bucket);
        assert_ne!(containing(at(2001, 7, 1, 0, 0, 0)), bucket);
        assert_ne!(containing(at(2001, 3, 31, 23, 59, 59)), bucket);
    }

    #[test]
    fn test_containing_orders_like_time() {
        let months: Vec<QuarterBucket> = (0..36)
            .map(|i| at(2000 + i / 12, i as u32 % 12 + 1, 1, 0, 0, 0))
            .map(QuarterBucket::containing)
            .collect();
        for pair in months.windows(2) {
            assert!(pair[0] <= pair[1]);
            assert!(pair[1] == pair[0] || pair[1] == pair[0].next());
        }
        let jan = QuarterBucket::containing(at(2001, 1, 1, 0, 0, 0));
        let apr = QuarterBucket::containing(at(2001, 4, 1, 0, 0, 0));
        assert!(jan < apr);
    }

    #[test]
    fn test_start_month_matches_containing() {
        for quarter in 1..=4 {
            let bucket = q(2001, quarter);
            assert_eq!(QuarterBucket::containing(bucket.start()), bucket);
        }
    }

    #[test]
    fn test_next_rolls_over_year() {
        assert_eq!(q(2001, 3).next(), q(2001, 4));
        assert_eq!(q(2001, 4).next(), q(2002, 1));
        assert_eq!(q(2001, 4).end(), at(2002, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_ordering_follows_start_time() {
        let mut buckets = vec![q(2002, 1), q(2001, 4), q(2001, 1)];
        buckets.sort();
        assert_eq!(buckets, vec![q(2001, 1), q(2001, 4), q(2002, 1)]);
    }

    #[test]
    fn test_span_is_contiguous() {
        let span = QuarterBucket::span(q(2000, 3), q(2001, 2));
        assert_eq!(span, vec![q(2000, 3), q(2000, 4), q(2001, 1), q(2001, 2)]);
        for pair in span.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn test_span_single_and_reversed() {
        assert_eq!(QuarterBucket::span(q(2001, 1), q(2001, 1)), vec![q(2001, 1)]);
        assert!(QuarterBucket::span(q(2001, 2), q(2001, 1)).is_empty());
    }

    #[test]
    fn test_covering_anchors_to_calendar_not_first_event() {
        let buckets = QuarterBucket::covering([
            at(2001, 5, 20, 10, 0, 0),
            at(2001, 2, 14, 9, 0, 0),
            at(2001, 11, 2, 8, 0, 0),
        ]);
        assert_eq!(buckets, vec![q(2001, 1), q(2001, 2), q(2001, 3), q(2001, 4)]);
        assert_eq!(buckets[0].start(), at(2001, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_covering_empty() {
        assert!(QuarterBucket::covering(Vec::new()).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(q(1999, 4).to_string(), "1999-Q4");
    }
}
