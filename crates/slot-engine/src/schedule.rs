//! Multi-party free-time search over UTC timestamps.
//!
//! Each [`Party`] lists the windows it is available in and the busy blocks inside
//! them. [`common_free_intervals`] finds the time free for every party at once by
//! chaining the two core pieces: per-party [`subtract`] over normalized input,
//! then an [`IntervalTree`] of the running result queried with the next party's
//! free time.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::Interval;
use crate::subtract::{merge_overlapping, subtract};
use crate::tree::IntervalTree;

/// An interval over UTC instants.
pub type TimeInterval = Interval<DateTime<Utc>>;

/// Number of slots returned by [`find_common_slots`] when no limit is given.
pub const DEFAULT_LIMIT: usize = 100;

/// One participant's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Opaque identifier, used only in logs and error messages.
    pub id: String,
    /// Windows the party is available in (e.g. working hours per day).
    pub available: Vec<TimeInterval>,
    /// Already-booked blocks.
    #[serde(default)]
    pub busy: Vec<TimeInterval>,
}

impl Party {
    /// Every available and busy interval must have `start < end`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` naming the party, the list and the
    /// position of the first offending interval.
    pub fn validate(&self) -> Result<()> {
        for (kind, list) in [("available", &self.available), ("busy", &self.busy)] {
            if let Some(idx) = list.iter().position(|i| i.start >= i.end) {
                return Err(list[idx].invalid(&format!("party '{}' {kind} #{idx}", self.id)));
            }
        }
        Ok(())
    }

    /// Free time: merged availability minus merged busy blocks.
    ///
    /// Sorted by start and non-overlapping regardless of input order.
    pub fn free_intervals(&self) -> Vec<TimeInterval> {
        subtract(
            &merge_overlapping(&self.available),
            &merge_overlapping(&self.busy),
        )
    }

    /// The span from the earliest available start to the latest available end.
    pub fn span(&self) -> Option<TimeInterval> {
        let start = self.available.iter().map(|i| i.start).min()?;
        let end = self.available.iter().map(|i| i.end).max()?;
        Some(Interval::new(start, end))
    }
}

/// The window shared by all `windows`: latest start to earliest end.
///
/// `None` when `windows` is empty or the shared part has no positive length.
pub fn intersect_windows<T: Ord + Copy>(windows: &[Interval<T>]) -> Option<Interval<T>> {
    let (first, rest) = windows.split_first()?;
    rest.iter().try_fold(*first, |acc, window| acc.intersection(window))
}

/// Intervals during which every party is free, sorted by start.
///
/// Touching free intervals (one ends where the other starts) do not produce a
/// zero-length common slot.
///
/// # Errors
/// Returns `SlotError::NoParties` for an empty slice, or the first validation
/// error from [`Party::validate`].
pub fn common_free_intervals(parties: &[Party]) -> Result<Vec<TimeInterval>> {
    let (first, rest) = parties.split_first().ok_or(SlotError::NoParties)?;
    for party in parties {
        party.validate()?;
    }

    let spans: Option<Vec<TimeInterval>> = parties.iter().map(Party::span).collect();
    if spans.and_then(|s| intersect_windows(&s)).is_none() {
        warn!("availability windows of {} parties never overlap", parties.len());
        return Ok(Vec::new());
    }

    let mut common = first.free_intervals();
    debug!("party '{}': {} free intervals", first.id, common.len());

    for party in rest {
        let tree: IntervalTree<_> = common.iter().copied().collect();
        let free = party.free_intervals();

        let mut next = Vec::new();
        for interval in &free {
            for hit in tree.query_interval(interval) {
                next.extend(hit.intersection(interval));
            }
        }
        next.sort();
        next.dedup();

        debug!(
            "party '{}': {} free intervals, {} shared so far",
            party.id,
            free.len(),
            next.len()
        );
        common = next;
        if common.is_empty() {
            break;
        }
    }

    if common.is_empty() {
        warn!("no free time shared by all {} parties", parties.len());
    }
    Ok(common)
}

/// A free slot shared by all parties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl From<TimeInterval> for FreeSlot {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            duration_minutes: (interval.end - interval.start).num_minutes(),
        }
    }
}

/// A search for common free time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub parties: Vec<Party>,
    /// Drop slots shorter than this (the meeting length).
    pub min_duration_minutes: Option<i64>,
    /// Maximum number of slots returned; [`DEFAULT_LIMIT`] when absent.
    pub limit: Option<usize>,
}

/// Common free slots at least `min_duration_minutes` long, earliest first,
/// capped at `limit`.
///
/// # Errors
/// Returns `SlotError::InvalidLimit` for a limit of 0, plus anything
/// [`common_free_intervals`] returns.
pub fn find_common_slots(request: &SlotRequest) -> Result<Vec<FreeSlot>> {
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(SlotError::InvalidLimit(limit));
    }
    let min_duration = request.min_duration_minutes.unwrap_or(0);

    Ok(common_free_intervals(&request.parties)?
        .into_iter()
        .map(FreeSlot::from)
        .filter(|slot| slot.duration_minutes >= min_duration)
        .take(limit)
        .collect())
}
