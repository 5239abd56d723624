//! Session-level orchestration: decode, smooth, align.
//!
//! A [`Session`] wires the pieces together for one recording: the fitted
//! state model decodes standardized spike counts into a latent-state
//! sequence, the raw frame labels are smoothed, and the two sequences are
//! aligned into a [`StateBehaviorMap`]. Loading the arrays from disk is the
//! caller's job; everything here is in-memory.

use ethomap_core::{EthomapError, Result};

use ethomap_behavior::label::BehaviorTable;
use ethomap_behavior::smooth::smooth;
use ethomap_neural::{SpikeCounts, StateDecoder};

use crate::align::{align, AlignConfig, StateBehaviorMap};

/// Configuration for a full session analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Alignment geometry and tolerances.
    pub align: AlignConfig,
    /// Minimum run length for the segment smoother, in frames.
    pub smooth_min_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            align: AlignConfig::default(),
            smooth_min_len: 6,
        }
    }
}

/// One recording session's analysis pipeline.
pub struct Session<'a, D: StateDecoder> {
    decoder: &'a D,
    config: SessionConfig,
}

impl<'a, D: StateDecoder> Session<'a, D> {
    /// Create a session around a fitted state model.
    pub fn new(decoder: &'a D, config: SessionConfig) -> Self {
        Self { decoder, config }
    }

    /// Decode states from `counts`, smooth `behaviors`, and align the two.
    ///
    /// # Errors
    ///
    /// Propagates decoder, smoother, and aligner errors; additionally
    /// rejects a decoder that returns a sequence of the wrong length.
    pub fn run(
        &self,
        counts: &SpikeCounts,
        behaviors: &[i32],
        table: &BehaviorTable,
    ) -> Result<StateBehaviorMap> {
        let states = self.decoder.decode(counts)?;
        if states.len() != counts.n_bins() {
            return Err(EthomapError::InvalidInput(format!(
                "decoder returned {} states for {} bins",
                states.len(),
                counts.n_bins()
            )));
        }
        let smoothed = smooth(behaviors, self.config.smooth_min_len)?;
        align(&states, &smoothed, table, &self.config.align)
    }
}
