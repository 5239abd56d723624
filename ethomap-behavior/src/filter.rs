//! Spatial/temporal exclusion filtering of behavior labels.
//!
//! Some recordings contain a region where the subject is not observable well
//! enough to classify (e.g. a nest box). Frames where the tracked position
//! falls inside such a region, from a given point in the session onward, are
//! marked [`UNLABELED`] so they never influence smoothing statistics or
//! majority votes.

use ethomap_core::{EthomapError, Result};

use crate::label::UNLABELED;

/// A rectangular region and session start frame outside of which labels are
/// left untouched.
///
/// Bounds are exclusive on both sides: a position is inside the zone when
/// `x_min < x < x_max` and `y_min < y < y_max`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionZone {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// First frame index at which the zone applies.
    pub start_frame: usize,
}

impl ExclusionZone {
    /// Create a zone after validating that the bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns an error if `x_min >= x_max` or `y_min >= y_max`.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        start_frame: usize,
    ) -> Result<Self> {
        if x_min >= x_max || y_min >= y_max {
            return Err(EthomapError::InvalidInput(format!(
                "degenerate exclusion bounds: x [{x_min}, {x_max}], y [{y_min}, {y_max}]"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            start_frame,
        })
    }

    /// Whether a tracked position lies inside the zone.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min < x && x < self.x_max && self.y_min < y && y < self.y_max
    }
}

/// Convert a session clock time to a frame index.
///
/// Zone start times are recorded as hours/minutes/seconds into the session;
/// the frame index is the rounded product with the frame rate.
pub fn clock_to_frame(hours: u32, minutes: u32, seconds: u32, frame_rate: u32) -> usize {
    let elapsed = f64::from(hours * 3600 + minutes * 60 + seconds);
    (elapsed * f64::from(frame_rate)).round() as usize
}

/// Mark frames spent inside an exclusion zone as [`UNLABELED`].
///
/// `xs` and `ys` are the tracked position per frame. Frames before
/// `zone.start_frame` are never excluded. Returns the number of frames
/// excluded; callers derive occupancy fractions from it.
///
/// # Errors
///
/// Returns an error if `xs` and `ys` differ in length or are shorter than
/// `labels` (every labeled frame needs a position).
pub fn apply_exclusion(
    labels: &mut [i32],
    xs: &[f64],
    ys: &[f64],
    zone: &ExclusionZone,
) -> Result<usize> {
    if xs.len() != ys.len() {
        return Err(EthomapError::InvalidInput(format!(
            "coordinate lengths differ: {} x vs {} y",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < labels.len() {
        return Err(EthomapError::InvalidInput(format!(
            "{} positions for {} labeled frames",
            xs.len(),
            labels.len()
        )));
    }

    let mut excluded = 0;
    for f in zone.start_frame..labels.len() {
        if zone.contains(xs[f], ys[f]) {
            labels[f] = UNLABELED;
            excluded += 1;
        }
    }
    Ok(excluded)
}

/// Trim a label sequence to the analysis session.
///
/// Drops the first `delay_seconds` worth of frames (annotation start offset,
/// truncated toward zero frames) and caps the result at `max_frames` when
/// given.
///
/// # Errors
///
/// Returns an error if `delay_seconds` is negative or the delay consumes the
/// whole sequence.
pub fn trim_to_session(
    labels: &[i32],
    delay_seconds: f64,
    frame_rate: u32,
    max_frames: Option<usize>,
) -> Result<Vec<i32>> {
    if delay_seconds < 0.0 {
        return Err(EthomapError::InvalidInput(format!(
            "delay_seconds must be >= 0, got {delay_seconds}"
        )));
    }
    let start = (delay_seconds * f64::from(frame_rate)).floor() as usize;
    if start >= labels.len() {
        return Err(EthomapError::InvalidInput(format!(
            "delay of {start} frames consumes the whole {}-frame sequence",
            labels.len()
        )));
    }
    let rest = &labels[start..];
    let take = max_frames.unwrap_or(rest.len()).min(rest.len());
    Ok(rest[..take].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_contains_is_exclusive() {
        let zone = ExclusionZone::new(900.0, 1050.0, 0.0, 150.0, 0).unwrap();
        assert!(zone.contains(1000.0, 75.0));
        assert!(!zone.contains(900.0, 75.0), "boundary is outside");
        assert!(!zone.contains(1000.0, 150.0), "boundary is outside");
        assert!(!zone.contains(500.0, 75.0));
    }

    #[test]
    fn degenerate_bounds_error() {
        assert!(ExclusionZone::new(10.0, 10.0, 0.0, 5.0, 0).is_err());
        assert!(ExclusionZone::new(0.0, 5.0, 9.0, 3.0, 0).is_err());
    }

    #[test]
    fn clock_conversion() {
        assert_eq!(clock_to_frame(0, 0, 0, 60), 0);
        assert_eq!(clock_to_frame(0, 0, 1, 60), 60);
        assert_eq!(clock_to_frame(3, 45, 0, 60), 13500 * 60);
    }

    #[test]
    fn excludes_frames_inside_zone_after_start() {
        let mut labels = vec![1, 1, 1, 1, 1];
        let xs = vec![50.0, 50.0, 5.0, 5.0, 50.0];
        let ys = vec![5.0, 5.0, 5.0, 5.0, 5.0];
        // Zone covers x in (0, 10); applies from frame 3 on.
        let zone = ExclusionZone::new(0.0, 10.0, 0.0, 10.0, 3).unwrap();
        let n = apply_exclusion(&mut labels, &xs, &ys, &zone).unwrap();
        assert_eq!(n, 1);
        assert_eq!(labels, vec![1, 1, 1, -1, 1]);
    }

    #[test]
    fn coordinates_may_outlive_labels() {
        let mut labels = vec![0, 0];
        let xs = vec![5.0, 50.0, 5.0];
        let ys = vec![5.0, 5.0, 5.0];
        let zone = ExclusionZone::new(0.0, 10.0, 0.0, 10.0, 0).unwrap();
        let n = apply_exclusion(&mut labels, &xs, &ys, &zone).unwrap();
        assert_eq!(n, 1);
        assert_eq!(labels, vec![-1, 0]);
    }

    #[test]
    fn short_coordinates_error() {
        let mut labels = vec![0, 0, 0];
        let zone = ExclusionZone::new(0.0, 10.0, 0.0, 10.0, 0).unwrap();
        assert!(apply_exclusion(&mut labels, &[1.0], &[1.0], &zone).is_err());
        assert!(apply_exclusion(&mut labels, &[1.0, 1.0, 1.0], &[1.0], &zone).is_err());
    }

    #[test]
    fn trim_drops_delay_and_caps_length() {
        let labels: Vec<i32> = (0..10).collect();
        // 2 frames of delay at 1 fps, capped at 5 frames.
        let out = trim_to_session(&labels, 2.0, 1, Some(5)).unwrap();
        assert_eq!(out, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn trim_without_cap_keeps_remainder() {
        let labels: Vec<i32> = (0..4).collect();
        assert_eq!(trim_to_session(&labels, 0.0, 60, None).unwrap(), labels);
    }

    #[test]
    fn trim_errors() {
        assert!(trim_to_session(&[1, 2, 3], -1.0, 60, None).is_err());
        assert!(trim_to_session(&[1, 2, 3], 1.0, 60, None).is_err());
    }
}
