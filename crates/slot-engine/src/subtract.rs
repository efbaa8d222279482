//! Remove busy sub-intervals from availability intervals.
//!
//! [`subtract`] is a single forward sweep over the busy list in the order given.
//! It is exact when `busy` is sorted by start and non-overlapping; otherwise a
//! busy interval that starts before an earlier one ended can be missed, because
//! the cursor only moves forward. [`subtract_merged`] normalizes `busy` with
//! [`merge_overlapping`] first and is exact for any input order.

use log::trace;

use crate::interval::Interval;

/// Free sub-intervals of each `available` interval after removing `busy`.
///
/// Each available interval is processed independently with a cursor starting at
/// its `start`. For every busy interval, in input order:
///
/// - `busy.start <= cursor < busy.end`: the cursor jumps to `busy.end`.
/// - `cursor < busy.start < avail.end`: the gap `[cursor, busy.start]` is
///   emitted and the cursor jumps to `max(cursor, busy.end)`.
/// - otherwise the busy interval is ignored.
///
/// A trailing `[cursor, avail.end]` is emitted when `cursor < avail.end`.
///
/// Never fails. Out-of-range, unsorted or overlapping busy input yields
/// well-defined but possibly incomplete results; see the module docs.
pub fn subtract<T: Ord + Copy>(available: &[Interval<T>], busy: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut free = Vec::new();

    for avail in available {
        let mut cursor = avail.start;

        for b in busy {
            if b.start <= cursor && cursor < b.end {
                cursor = cursor.max(b.end);
            } else if cursor < b.start && b.start < avail.end {
                free.push(Interval::new(cursor, b.start));
                cursor = cursor.max(b.end);
            } else {
                trace!("busy interval does not cut the remaining availability; skipped");
            }
        }

        if cursor < avail.end {
            free.push(Interval::new(cursor, avail.end));
        }
    }

    free
}

/// Sort intervals by start and merge those that overlap or touch.
///
/// Returns a sorted, non-overlapping list.
pub fn merge_overlapping<T: Ord + Copy>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut sorted = intervals.to_vec();
    sorted.sort();

    let mut merged: Vec<Interval<T>> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// [`subtract`] after normalizing `busy` with [`merge_overlapping`].
pub fn subtract_merged<T: Ord + Copy>(
    available: &[Interval<T>],
    busy: &[Interval<T>],
) -> Vec<Interval<T>> {
    subtract(available, &merge_overlapping(busy))
}
