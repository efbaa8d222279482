//! The `Interval` value type shared by the tree and the subtractor.
//!
//! An interval is a closed `[start, end]` pair over any totally ordered, copyable
//! time representation. Construction through [`Interval::new`] does not check
//! `start <= end`; callers that want that guarantee use [`Interval::try_new`] or
//! [`validate`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A closed time interval `[start, end]`.
///
/// Ordering is by `start`, then by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T: Ord + Copy> Interval<T> {
    /// Build an interval without validating it.
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Returns `true` when `start <= end`.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Inclusive overlap test: `[a, b]` overlaps `[s, e]` iff `a <= e && s <= b`.
    ///
    /// Touching intervals (`a.end == b.start`) overlap under this test.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns `true` when `point` lies within `[start, end]`.
    pub fn contains(&self, point: T) -> bool {
        self.start <= point && point <= self.end
    }

    /// The common part of two intervals, or `None` when they do not share
    /// a span of positive length.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }
}

impl<T: Ord + Copy + fmt::Display> Interval<T> {
    /// Build an interval, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` when `start > end`.
    pub fn try_new(start: T, end: T) -> Result<Self> {
        let interval = Self { start, end };
        if interval.is_valid() {
            Ok(interval)
        } else {
            Err(interval.invalid("interval"))
        }
    }

    pub(crate) fn invalid(&self, context: &str) -> SlotError {
        SlotError::InvalidInterval {
            context: context.to_string(),
            start: self.start.to_string(),
            end: self.end.to_string(),
        }
    }
}

impl<T> From<(T, T)> for Interval<T> {
    fn from((start, end): (T, T)) -> Self {
        Self { start, end }
    }
}

impl<T> From<Interval<T>> for (T, T) {
    fn from(interval: Interval<T>) -> Self {
        (interval.start, interval.end)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Check that every interval in `intervals` satisfies `start <= end`.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` for the first offending interval,
/// with `context` naming its position.
pub fn validate<T: Ord + Copy + fmt::Display>(intervals: &[Interval<T>]) -> Result<()> {
    match intervals.iter().position(|i| !i.is_valid()) {
        Some(idx) => Err(intervals[idx].invalid(&format!("interval #{idx}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_inclusive_at_both_ends() {
        let a = Interval::new(1, 5);
        assert!(a.overlaps(&Interval::new(5, 9)));
        assert!(a.overlaps(&Interval::new(0, 1)));
        assert!(!a.overlaps(&Interval::new(6, 9)));
    }

    #[test]
    fn intersection_drops_touching_point() {
        let a = Interval::new(1, 5);
        assert_eq!(a.intersection(&Interval::new(3, 9)), Some(Interval::new(3, 5)));
        assert_eq!(a.intersection(&Interval::new(5, 9)), None);
    }

    #[test]
    fn try_new_rejects_reversed_bounds() {
        assert!(Interval::try_new(3, 3).is_ok());
        let err = Interval::try_new(4, 3).unwrap_err();
        assert_eq!(
            err,
            SlotError::InvalidInterval {
                context: "interval".to_string(),
                start: "4".to_string(),
                end: "3".to_string(),
            }
        );
    }

    #[test]
    fn validate_reports_first_bad_position() {
        let intervals = [Interval::new(1, 2), Interval::new(5, 4), Interval::new(9, 8)];
        match validate(&intervals) {
            Err(SlotError::InvalidInterval { context, .. }) => assert_eq!(context, "interval #1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn orders_by_start_then_end() {
        let mut v = vec![Interval::new(3, 4), Interval::new(1, 9), Interval::new(1, 2)];
        v.sort();
        assert_eq!(v, vec![Interval::new(1, 2), Interval::new(1, 9), Interval::new(3, 4)]);
    }
}
