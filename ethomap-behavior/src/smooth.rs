//! Segment smoothing for frame-level behavior label sequences.
//!
//! Frame classifiers produce noisy per-frame labels: a stable behavior is
//! often interrupted by runs of one or two misclassified frames. The smoother
//! removes such runs in two passes over the segment partition of the *input*
//! sequence:
//!
//! 1. **Bridge pass** — a segment shorter than `min_len` whose neighbors on
//!    both sides carry the same label and are each at least `min_len` long is
//!    absorbed into that label, bridging a brief interruption of an
//!    otherwise-stable behavior.
//! 2. **Cleanup pass** — any segment still shorter than `min_len` is absorbed
//!    into whatever label immediately precedes it.
//!
//! Both passes index against the boundary positions of the unmodified input;
//! the partition is not recomputed between passes. Downstream consumers depend
//! on this exact output, so the pass structure must not be "corrected". (A
//! variant that re-partitions after each merge produces the same output here,
//! since every cleanup fill absorbs into the evolving predecessor value; see
//! DESIGN.md.)
//!
//! # Quick start
//!
//! ```
//! use ethomap_behavior::smooth::smooth;
//!
//! let labels = vec![0, 0, 0, 1, 0, 0, 0];
//! let cleaned = smooth(&labels, 2).unwrap();
//! assert_eq!(cleaned, vec![0, 0, 0, 0, 0, 0, 0]);
//! ```

use ethomap_core::{EthomapError, Result};

/// Segment boundary positions of a label sequence.
///
/// Returns every index at which a new maximal run of identical labels starts,
/// plus the terminal position `labels.len()`. Consecutive entries therefore
/// delimit exactly the segments of the sequence.
pub fn segment_boundaries(labels: &[i32]) -> Vec<usize> {
    let mut bounds = Vec::new();
    if labels.is_empty() {
        return bounds;
    }
    bounds.push(0);
    for i in 1..labels.len() {
        if labels[i] != labels[i - 1] {
            bounds.push(i);
        }
    }
    bounds.push(labels.len());
    bounds
}

/// Remove runs shorter than `min_len` from a label sequence.
///
/// Returns a new sequence of the same length; the input is never mutated.
/// Values in the output are always drawn from values present in the input.
/// The very first segment is never absorbed (it has no preceding frame to
/// absorb it into) and is returned unchanged even when shorter than
/// `min_len`.
///
/// With `min_len == 1` this is the identity function.
///
/// # Errors
///
/// Returns an error if `labels` is empty or `min_len` is zero.
pub fn smooth(labels: &[i32], min_len: usize) -> Result<Vec<i32>> {
    if labels.is_empty() {
        return Err(EthomapError::InvalidInput("label sequence is empty".into()));
    }
    if min_len == 0 {
        return Err(EthomapError::InvalidInput("min_len must be >= 1".into()));
    }

    let bounds = segment_boundaries(labels);
    let mut out = labels.to_vec();

    // Bridge pass: absorb short segments interrupting a stable behavior.
    // Boundary quadruple (a, b, c, d) delimits segments a..b, b..c, c..d.
    for i in 0..bounds.len().saturating_sub(3) {
        let (a, b, c, d) = (bounds[i], bounds[i + 1], bounds[i + 2], bounds[i + 3]);
        if c - b < min_len && out[c] == out[a] && b - a >= min_len && d - c >= min_len {
            let fill = out[a];
            out[a..c].fill(fill);
        }
    }

    // Cleanup pass: absorb anything still short into its preceding label,
    // reading the evolving buffer but the original boundary positions.
    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if end - start < min_len && start > 0 {
            let fill = out[start - 1];
            out[start..end].fill(fill);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_partition_the_sequence() {
        assert_eq!(segment_boundaries(&[0, 0, 1, 1, 1, 2]), vec![0, 2, 5, 6]);
        assert_eq!(segment_boundaries(&[4]), vec![0, 1]);
        assert_eq!(segment_boundaries(&[]), Vec::<usize>::new());
    }

    #[test]
    fn bridges_single_frame_interruption() {
        // Scenario: a lone misclassified frame inside a stable run.
        let labels = vec![0, 0, 0, 1, 0, 0, 0];
        assert_eq!(smooth(&labels, 2).unwrap(), vec![0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn cleanup_absorbs_trailing_short_segment() {
        let labels = vec![0, 0, 1, 1, 1, 2, 2];
        // [0,0] is the first segment and stays; [2,2] is absorbed into the 1s.
        assert_eq!(smooth(&labels, 3).unwrap(), vec![0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn bridge_requires_matching_neighbors() {
        let labels = vec![0, 0, 1, 2, 2];
        // The 1 cannot bridge (neighbors differ); cleanup absorbs it leftward.
        assert_eq!(smooth(&labels, 2).unwrap(), vec![0, 0, 0, 2, 2]);
    }

    #[test]
    fn bridge_requires_long_neighbors() {
        // Left neighbor of the lone 1 is a single frame, too short to anchor
        // a bridge; cleanup still absorbs both short runs leftward.
        let labels = vec![0, 1, 0, 0];
        assert_eq!(smooth(&labels, 2).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn min_len_one_is_identity() {
        let labels = vec![3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(smooth(&labels, 1).unwrap(), labels);
    }

    #[test]
    fn output_length_matches_input() {
        let labels = vec![0, 0, 1, 0, 2, 2, 2, 1, 1, 0, 0, 0];
        for min_len in 1..=6 {
            assert_eq!(smooth(&labels, min_len).unwrap().len(), labels.len());
        }
    }

    #[test]
    fn no_new_labels_introduced() {
        let labels = vec![5, 5, 2, 5, 5, 7, 7, 2, 7, 7];
        let out = smooth(&labels, 2).unwrap();
        for v in &out {
            assert!(labels.contains(v), "label {v} not present in input");
        }
    }

    #[test]
    fn idempotent_once_stable() {
        let labels = vec![0, 0, 1, 0, 2, 2, 2, 1, 1, 0, 0, 0];
        let once = smooth(&labels, 3).unwrap();
        let twice = smooth(&once, 3).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn first_segment_shorter_than_min_len_is_kept() {
        let labels = vec![9, 3, 3, 3];
        assert_eq!(smooth(&labels, 2).unwrap(), vec![9, 3, 3, 3]);
    }

    #[test]
    fn unlabeled_runs_are_smoothed_like_any_class() {
        // -1 (excluded) behaves as an ordinary class during smoothing.
        let labels = vec![0, 0, 0, -1, 0, 0, 0];
        assert_eq!(smooth(&labels, 2).unwrap(), vec![0; 7]);
    }

    #[test]
    fn empty_input_error() {
        assert!(smooth(&[], 2).is_err());
    }

    #[test]
    fn zero_min_len_error() {
        assert!(smooth(&[1, 2, 3], 0).is_err());
    }

    #[test]
    fn single_frame_sequence_is_unchanged() {
        assert_eq!(smooth(&[7], 5).unwrap(), vec![7]);
    }
}
