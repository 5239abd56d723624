//! Latent-state to behavior alignment for the ethomap ecosystem.
//!
//! A statistical state model segments a neural recording into discrete latent
//! states; a video classifier labels the same session with behaviors. This
//! crate decides which behavior each latent state represents:
//!
//! - **Alignment** — [`align::align`] windows each state occurrence over the
//!   frame labels and elects one representative behavior per state by
//!   two-level majority vote
//! - **Sessions** — [`session::Session`] runs the full decode → smooth →
//!   align pipeline for one recording
//!
//! Enable the `parallel` feature to distribute the per-state vote across
//! threads with rayon; results are identical either way.

pub mod align;
pub mod session;

pub use align::{
    align, AlignConfig, BehaviorCount, StateAssignment, StateBehaviorMap, LEAD_LAG_UNIT_SECONDS,
};
pub use session::{Session, SessionConfig};
