//! Windowed majority-vote alignment of latent states to behaviors.
//!
//! The state model and the behavior classifier label the same session on
//! different clocks: states arrive once per bin, behaviors once per video
//! frame, and the annotations may lead or trail the neural activity by a few
//! hundred milliseconds. For every occurrence of a state, the aligner looks
//! at a window of frames around the corresponding frame index and takes a
//! majority vote over the behavior labels it finds there; a second vote over
//! all occurrence winners then elects one representative behavior per state.
//!
//! Placeholder classes (the table's sentinel name) and unlabeled frames never
//! win a vote, no matter how often they occur. A state whose windows contain
//! nothing else is reported as unidentified rather than mislabeled.
//!
//! # Quick start
//!
//! ```
//! use ethomap_align::align::{align, AlignConfig};
//! use ethomap_behavior::BehaviorTable;
//!
//! let table = BehaviorTable::new(vec!["groom", "rear"], "insignificant").unwrap();
//! let states = vec![0, 0, 1, 1];
//! let behaviors = vec![1, 1, 1, 1, 0, 0, 0, 0];
//!
//! let config = AlignConfig {
//!     sample_rate: 30,
//!     frame_rate: 60,
//!     lead_seconds: 0.0,
//!     lag_seconds: 0.0,
//! };
//! let map = align(&states, &behaviors, &table, &config).unwrap();
//! assert_eq!(map.behavior_for(0), Some(1));
//! assert_eq!(map.behavior_for(1), Some(0));
//! ```

use std::collections::BTreeMap;

use ethomap_core::{EthomapError, Result, Summarizable};

use ethomap_behavior::label::{BehaviorTable, UNLABELED, UNLABELED_NAME};

/// Lead/lag tolerances are specified as multiples of this sub-bin unit.
///
/// A lead of 0.1 s therefore widens the window by exactly one bin-width of
/// frames at the default 10 Hz bin resolution.
pub const LEAD_LAG_UNIT_SECONDS: f64 = 0.1;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for state-behavior alignment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignConfig {
    /// State bins per second.
    pub sample_rate: u32,
    /// Video frames per second. Must be an integer multiple of `sample_rate`.
    pub frame_rate: u32,
    /// Window extension before each state occurrence, in seconds.
    pub lead_seconds: f64,
    /// Window extension after each state occurrence, in seconds.
    pub lag_seconds: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            sample_rate: 10,
            frame_rate: 60,
            lead_seconds: 0.1,
            lag_seconds: 0.3,
        }
    }
}

impl AlignConfig {
    /// Resolve the frame-domain geometry: `(ratio, lead_frames, lag_frames)`.
    ///
    /// Lead and lag are converted with [`LEAD_LAG_UNIT_SECONDS`] and rounded
    /// to the nearest frame (half away from zero).
    ///
    /// # Errors
    ///
    /// Returns an error if either rate is zero, `frame_rate` is not divisible
    /// by `sample_rate`, or a tolerance is negative or non-finite.
    fn frame_geometry(&self) -> Result<(usize, usize, usize)> {
        if self.sample_rate == 0 || self.frame_rate == 0 {
            return Err(EthomapError::InvalidInput(format!(
                "rates must be > 0, got sample {} / frame {}",
                self.sample_rate, self.frame_rate
            )));
        }
        if self.frame_rate % self.sample_rate != 0 {
            return Err(EthomapError::InvalidInput(format!(
                "frame rate {} is not an integer multiple of sample rate {}",
                self.frame_rate, self.sample_rate
            )));
        }
        for (name, value) in [("lead", self.lead_seconds), ("lag", self.lag_seconds)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EthomapError::InvalidInput(format!(
                    "{name}_seconds must be finite and >= 0, got {value}"
                )));
            }
        }
        let ratio = (self.frame_rate / self.sample_rate) as usize;
        let lead = (ratio as f64 * self.lead_seconds / LEAD_LAG_UNIT_SECONDS).round() as usize;
        let lag = (ratio as f64 * self.lag_seconds / LEAD_LAG_UNIT_SECONDS).round() as usize;
        Ok((ratio, lead, lag))
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The representative behavior elected for one latent state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateAssignment {
    /// Latent state identifier.
    pub state: usize,
    /// Winning behavior class, or [`UNLABELED`] when none was identified.
    pub behavior: i32,
    /// Resolved behavior name ([`UNLABELED_NAME`] for unidentified states).
    pub name: String,
}

/// Number of states electing one representative behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorCount {
    pub behavior: i32,
    pub name: String,
    pub n_states: usize,
}

/// Per-state representative behaviors for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateBehaviorMap {
    assignments: Vec<StateAssignment>,
}

impl StateBehaviorMap {
    /// All assignments, in ascending state order.
    pub fn assignments(&self) -> &[StateAssignment] {
        &self.assignments
    }

    /// Number of distinct states observed.
    pub fn n_states(&self) -> usize {
        self.assignments.len()
    }

    /// Representative behavior for a state, if the state was observed.
    pub fn behavior_for(&self, state: usize) -> Option<i32> {
        self.assignments
            .iter()
            .find(|a| a.state == state)
            .map(|a| a.behavior)
    }

    /// Resolved behavior name for a state, if the state was observed.
    pub fn name_for(&self, state: usize) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.state == state)
            .map(|a| a.name.as_str())
    }

    /// How many states each representative behavior received, sorted by
    /// descending state count (ties toward the smaller behavior id).
    ///
    /// Unidentified states are reported under [`UNLABELED`].
    pub fn behavior_counts(&self) -> Vec<BehaviorCount> {
        let mut by_behavior: BTreeMap<i32, (String, usize)> = BTreeMap::new();
        for a in &self.assignments {
            let entry = by_behavior
                .entry(a.behavior)
                .or_insert_with(|| (a.name.clone(), 0));
            entry.1 += 1;
        }
        let mut counts: Vec<BehaviorCount> = by_behavior
            .into_iter()
            .map(|(behavior, (name, n_states))| BehaviorCount {
                behavior,
                name,
                n_states,
            })
            .collect();
        counts.sort_by(|a, b| b.n_states.cmp(&a.n_states));
        counts
    }
}

impl Summarizable for StateBehaviorMap {
    fn summary(&self) -> String {
        format!(
            "StateBehaviorMap: {} states, {} distinct behaviors",
            self.assignments.len(),
            self.behavior_counts().len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Voting
// ---------------------------------------------------------------------------

/// Most frequent eligible behavior in a tally, or [`UNLABELED`] when every
/// candidate is a sentinel class or unlabeled.
///
/// The tally iterates in ascending id order and the sort by descending count
/// is stable, so ties between equally frequent candidates break toward the
/// smaller behavior id.
fn most_frequent_eligible(tally: &BTreeMap<i32, usize>, table: &BehaviorTable) -> i32 {
    let mut ranked: Vec<(i32, usize)> = tally.iter().map(|(&id, &n)| (id, n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    for (id, _) in ranked {
        if table.eligible(id) {
            return id;
        }
    }
    UNLABELED
}

/// Elect the representative behavior for one state.
fn assign_state(
    state: usize,
    states: &[usize],
    behaviors: &[i32],
    table: &BehaviorTable,
    ratio: usize,
    lead_frames: usize,
    lag_frames: usize,
) -> StateAssignment {
    let n_frames = behaviors.len();
    let mut occurrence_winners: BTreeMap<i32, usize> = BTreeMap::new();

    for (bin, _) in states.iter().enumerate().filter(|(_, &s)| s == state) {
        let frame = bin * ratio;
        // The window always contains the occurrence frame itself; lead and
        // lag extend it backward and forward, clipped to the session.
        let start = frame.saturating_sub(lead_frames);
        let end = (frame + lag_frames + 1).min(n_frames);
        if start >= end {
            continue;
        }

        let mut votes: BTreeMap<i32, usize> = BTreeMap::new();
        for &b in &behaviors[start..end] {
            *votes.entry(b).or_insert(0) += 1;
        }
        let winner = most_frequent_eligible(&votes, table);
        if winner != UNLABELED {
            *occurrence_winners.entry(winner).or_insert(0) += 1;
        }
    }

    let behavior = most_frequent_eligible(&occurrence_winners, table);
    let name = table
        .name(behavior)
        .unwrap_or(UNLABELED_NAME)
        .to_string();
    StateAssignment {
        state,
        behavior,
        name,
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Map every distinct latent state to a representative behavior.
///
/// `states` holds one latent state per bin, `behaviors` one class per video
/// frame; the two clocks are related by `config.frame_rate /
/// config.sample_rate`. States are processed in ascending identifier order
/// and each receives exactly one assignment.
///
/// # Errors
///
/// Returns an error if either sequence is empty or the configuration is
/// invalid (see [`AlignConfig`]).
pub fn align(
    states: &[usize],
    behaviors: &[i32],
    table: &BehaviorTable,
    config: &AlignConfig,
) -> Result<StateBehaviorMap> {
    if states.is_empty() {
        return Err(EthomapError::InvalidInput("state sequence is empty".into()));
    }
    if behaviors.is_empty() {
        return Err(EthomapError::InvalidInput(
            "behavior sequence is empty".into(),
        ));
    }
    let (ratio, lead_frames, lag_frames) = config.frame_geometry()?;

    let mut distinct: Vec<usize> = states.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    #[cfg(feature = "parallel")]
    let assignments: Vec<StateAssignment> = {
        use rayon::prelude::*;
        distinct
            .par_iter()
            .map(|&s| assign_state(s, states, behaviors, table, ratio, lead_frames, lag_frames))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let assignments: Vec<StateAssignment> = distinct
        .iter()
        .map(|&s| assign_state(s, states, behaviors, table, ratio, lead_frames, lag_frames))
        .collect();

    Ok(StateBehaviorMap { assignments })
}

// ===========================================================================
// Tests
// ===========================================================================
