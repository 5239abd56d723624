//! Core trait definitions for the ethomap ecosystem.
//!
//! These traits define the contracts that domain types implement across crates.

/// A type that can produce a summary of its contents.
///
/// Implemented by analysis results so that callers can report outcomes
/// without the library printing anything itself.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
