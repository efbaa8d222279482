//! # slot-engine
//!
//! Find the time slots that are free for several parties at once.
//!
//! Two independent pieces do the work:
//!
//! - [`IntervalTree`] — an augmented BST keyed by interval start that answers
//!   "which stored intervals overlap `[s, e]`?", pruning left subtrees by their
//!   maximum end time.
//! - [`subtract()`] — removes busy blocks from availability windows, leaving the
//!   free sub-intervals.
//!
//! The output of [`subtract()`] is valid input to [`IntervalTree::insert_interval`];
//! [`schedule`] chains the two into a multi-party search over UTC timestamps.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{subtract, Interval, IntervalTree};
//!
//! let free = subtract(&[Interval::new(9, 17)], &[Interval::new(12, 13)]);
//! assert_eq!(free, vec![Interval::new(9, 12), Interval::new(13, 17)]);
//!
//! let tree: IntervalTree<i32> = free.into_iter().collect();
//! assert_eq!(tree.query(10, 11), vec![Interval::new(9, 12)]);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — the `Interval` value type and validation helpers
//! - [`tree`] — the augmented interval tree
//! - [`subtract`](mod@subtract) — free/busy subtraction and busy-period merging
//! - [`schedule`] — multi-party common free time over `DateTime<Utc>`
//! - [`error`] — Error types

pub mod error;
pub mod interval;
pub mod schedule;
pub mod subtract;
pub mod tree;

pub use error::SlotError;
pub use interval::Interval;
pub use schedule::{common_free_intervals, find_common_slots, FreeSlot, Party, SlotRequest};
pub use subtract::{merge_overlapping, subtract, subtract_merged};
pub use tree::IntervalTree;
