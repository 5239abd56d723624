//! Shared primitives and traits for the ethomap ecosystem.
//!
//! `ethomap-core` provides the foundation that all other ethomap crates
//! build on:
//!
//! - **Error types** — [`EthomapError`] and [`Result`] for structured error handling
//! - **Traits** — Core abstractions like [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{EthomapError, Result};
pub use traits::*;
