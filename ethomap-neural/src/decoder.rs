//! The latent-state decoder contract.
//!
//! State models are fitted elsewhere (and often in another toolchain); this
//! crate only consumes them through [`StateDecoder`]. Any model that can turn
//! a standardized spike-count matrix into one discrete state per bin can be
//! plugged in, including fixed-sequence stubs in tests.

use ethomap_core::Result;

use crate::spike::SpikeCounts;

/// A fitted model that assigns one latent state per time bin.
pub trait StateDecoder {
    /// Number of latent states the model can emit.
    fn n_states(&self) -> usize;

    /// Decode one state per bin of `counts`.
    ///
    /// The returned sequence has length `counts.n_bins()` and values in
    /// `[0, n_states)`.
    ///
    /// # Errors
    ///
    /// Implementations report observations incompatible with the fitted
    /// model (wrong neuron count, empty input) as errors.
    fn decode(&self, counts: &SpikeCounts) -> Result<Vec<usize>>;
}
