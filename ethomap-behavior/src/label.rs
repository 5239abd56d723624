//! Behavior class name tables.
//!
//! A [`BehaviorTable`] maps integer behavior-class identifiers (as produced by
//! a frame-level classifier) to human-readable names. One name is reserved as
//! the *sentinel*: classes carrying it are placeholders that must never win a
//! majority vote, no matter how often they occur.

use ethomap_core::{EthomapError, Result, Summarizable};

/// Identifier used when no behavior could be determined.
///
/// Also the value loaders assign to frames excluded from analysis.
pub const UNLABELED: i32 = -1;

/// Name resolved for the [`UNLABELED`] identifier.
pub const UNLABELED_NAME: &str = "unidentified";

/// An index-addressable table of behavior class names with a sentinel entry.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorTable {
    names: Vec<String>,
    sentinel: String,
}

impl BehaviorTable {
    /// Create a table from ordered class names and the sentinel name.
    ///
    /// # Errors
    ///
    /// Returns an error if `names` is empty or the sentinel name is empty.
    pub fn new<S: Into<String>>(names: Vec<S>, sentinel: impl Into<String>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(EthomapError::InvalidInput("behavior table is empty".into()));
        }
        let sentinel = sentinel.into();
        if sentinel.is_empty() {
            return Err(EthomapError::InvalidInput("sentinel name is empty".into()));
        }
        Ok(Self { names, sentinel })
    }

    /// Number of behavior classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The sentinel name that is ineligible as a vote winner.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Name for a class identifier.
    ///
    /// Negative identifiers (including [`UNLABELED`]) resolve to
    /// [`UNLABELED_NAME`]; identifiers past the end of the table resolve to
    /// `None`.
    pub fn name(&self, id: i32) -> Option<&str> {
        if id < 0 {
            return Some(UNLABELED_NAME);
        }
        self.names.get(id as usize).map(String::as_str)
    }

    /// Identifier for a class name, if present.
    pub fn id(&self, name: &str) -> Option<i32> {
        self.names.iter().position(|n| n == name).map(|i| i as i32)
    }

    /// Whether a class identifier may win a majority vote.
    ///
    /// Unlabeled frames and sentinel-named classes are ineligible; so are
    /// identifiers outside the table.
    pub fn eligible(&self, id: i32) -> bool {
        if id < 0 {
            return false;
        }
        match self.names.get(id as usize) {
            Some(name) => name != &self.sentinel,
            None => false,
        }
    }
}

impl Summarizable for BehaviorTable {
    fn summary(&self) -> String {
        let n_sentinel = self.names.iter().filter(|n| *n == &self.sentinel).count();
        format!(
            "BehaviorTable: {} classes ({} sentinel)",
            self.names.len(),
            n_sentinel,
        )
    }
}
