//! Property-based tests for the interval tree and subtraction using proptest.
//!
//! The brute-force reference for every query is a linear scan with the same
//! inclusive overlap test, i.e. the tree with no pruning at all.

use proptest::prelude::*;
use slot_engine::{merge_overlapping, subtract, Interval, IntervalTree};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Intervals with `start <= end` on a small grid so overlaps are common.
fn arb_interval() -> impl Strategy<Value = Interval<i32>> {
    (0i32..200, 0i32..40).prop_map(|(start, len)| Interval::new(start, start + len))
}

fn arb_intervals() -> impl Strategy<Value = Vec<Interval<i32>>> {
    prop::collection::vec(arb_interval(), 0..80)
}

/// Busy blocks of positive length.
fn arb_busy() -> impl Strategy<Value = Vec<Interval<i32>>> {
    prop::collection::vec(
        (0i32..260, 1i32..30).prop_map(|(start, len)| Interval::new(start, start + len)),
        0..20,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sorted(mut v: Vec<Interval<i32>>) -> Vec<Interval<i32>> {
    v.sort();
    v
}

fn brute_force(intervals: &[Interval<i32>], range: &Interval<i32>) -> Vec<Interval<i32>> {
    sorted(
        intervals
            .iter()
            .copied()
            .filter(|i| i.start <= range.end && range.start <= i.end)
            .collect(),
    )
}

proptest! {
    /// Pruned query returns exactly the intervals a full scan finds.
    #[test]
    fn query_matches_linear_scan(intervals in arb_intervals(), range in arb_interval()) {
        let tree: IntervalTree<i32> = intervals.iter().copied().collect();

        let found = sorted(tree.query(range.start, range.end));

        prop_assert_eq!(found, brute_force(&intervals, &range));
    }

    /// Every hit really overlaps the query range.
    #[test]
    fn query_hits_overlap(intervals in arb_intervals(), range in arb_interval()) {
        let tree: IntervalTree<i32> = intervals.iter().copied().collect();

        for hit in tree.query_interval(&range) {
            prop_assert!(hit.overlaps(&range), "{:?} does not overlap {:?}", hit, range);
        }
    }

    /// The root's max_end is the largest end ever inserted.
    #[test]
    fn max_end_is_largest_end(intervals in arb_intervals()) {
        let mut tree = IntervalTree::new();
        for interval in &intervals {
            tree.insert_interval(*interval);
            let expected = intervals
                .iter()
                .take(tree.len())
                .map(|i| i.end)
                .max();
            prop_assert_eq!(tree.max_end(), expected);
        }
    }

    /// In-order traversal is sorted by start and holds every inserted interval.
    #[test]
    fn iter_is_sorted_permutation(intervals in arb_intervals()) {
        let tree: IntervalTree<i32> = intervals.iter().copied().collect();
        let walked: Vec<_> = tree.iter().collect();

        prop_assert_eq!(walked.len(), intervals.len());
        prop_assert!(walked.windows(2).all(|w| w[0].start <= w[1].start));
        prop_assert_eq!(sorted(walked), sorted(intervals));
    }

    /// Querying twice without modification gives the same answer.
    #[test]
    fn query_is_idempotent(intervals in arb_intervals(), range in arb_interval()) {
        let tree: IntervalTree<i32> = intervals.iter().copied().collect();

        prop_assert_eq!(tree.query_interval(&range), tree.query_interval(&range));
    }

    /// Free intervals never overlap the interior of a busy block and stay
    /// inside the available window.
    #[test]
    fn subtract_sorted_busy_is_exact(avail in arb_interval(), busy in arb_busy()) {
        let busy = merge_overlapping(&busy);
        let free = subtract(&[avail], &busy);

        for f in &free {
            prop_assert!(f.start < f.end);
            prop_assert!(avail.start <= f.start && f.end <= avail.end);
            for b in &busy {
                prop_assert!(!(f.start < b.end && b.start < f.end), "{:?} overlaps busy {:?}", f, b);
            }
        }
        prop_assert!(free.windows(2).all(|w| w[0].end <= w[1].start));
    }

    /// Inserting subtraction output into a fresh tree and querying the whole
    /// available window returns each free interval exactly once.
    #[test]
    fn subtract_then_tree_round_trip(avail in arb_interval(), busy in arb_busy()) {
        let free = subtract(&[avail], &merge_overlapping(&busy));
        let tree: IntervalTree<i32> = free.iter().copied().collect();

        let found = sorted(tree.query(avail.start, avail.end));

        prop_assert_eq!(found, sorted(free));
    }
}
