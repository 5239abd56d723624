//! Frame-level behavior labels for the ethomap ecosystem.
//!
//! A video-based classifier assigns one behavior class per frame; this crate
//! owns everything that happens to those labels before they are compared with
//! neural latent states:
//!
//! - **Name tables** — [`label::BehaviorTable`] maps class ids to names and
//!   tracks the sentinel class that may never win a vote
//! - **Segment smoothing** — [`smooth::smooth`] removes short spurious runs
//! - **Exclusion filtering** — [`filter`] marks unobservable frames unlabeled
//!   and trims sequences to the analysis session

pub mod filter;
pub mod label;
pub mod smooth;

pub use filter::{apply_exclusion, trim_to_session, ExclusionZone};
pub use label::{BehaviorTable, UNLABELED, UNLABELED_NAME};
pub use smooth::{segment_boundaries, smooth};
