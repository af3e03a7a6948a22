//! Entry snapshots.
//!
//! A spin works on its own copy of the entry list so callers can keep
//! editing their list while the wheel turns without shifting indices under
//! the animation.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Per-entry weights keyed by name. Missing names weigh 1.
pub type WeightMap = BTreeMap<String, f64>;

/// Immutable, cheaply cloned, ordered list of entry names.
///
/// Order defines arc placement: entry `i` owns arc `i`. Duplicates are kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EntrySet(Arc<[String]>);

impl EntrySet {
    /// Snapshot a list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Name at `index`, if any.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for EntrySet {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl Deref for EntrySet {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for EntrySet {
    fn from(names: Vec<String>) -> Self {
        Self(names.into())
    }
}

impl From<&[String]> for EntrySet {
    fn from(names: &[String]) -> Self {
        Self(names.into())
    }
}

impl From<&[&str]> for EntrySet {
    fn from(names: &[&str]) -> Self {
        Self::new(names.iter().copied())
    }
}

impl From<EntrySet> for Vec<String> {
    fn from(set: EntrySet) -> Self {
        set.0.to_vec()
    }
}
