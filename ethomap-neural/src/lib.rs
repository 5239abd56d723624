//! Neural recording data for the ethomap ecosystem.
//!
//! Latent states are inferred from binned spike counts by a pre-fitted state
//! model. This crate owns the observation side of that contract:
//!
//! - **Spike counts** — [`spike::SpikeCounts`], a `(bins × neurons)` matrix
//!   with range selection and per-neuron z-scoring
//! - **Decoder contract** — [`decoder::StateDecoder`], the capability any
//!   fitted state model exposes to the rest of the ecosystem

pub mod decoder;
pub mod spike;

pub use decoder::StateDecoder;
pub use spike::SpikeCounts;
