//! Strongly-typed delta-set name.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;

/// A non-empty delta-set name.
///
/// Delta-sets partition the changelog into independent migration streams,
/// so mixing one up with a file name or a scheme is always a bug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeltaSet(String);

impl DeltaSet {
    /// Create a new `DeltaSet`, panicking if the name is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        assert!(!s.is_empty(), "DeltaSet must not be empty");
        Self(s)
    }

    /// Try to create a new `DeltaSet`, returning `None` if the name is empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeltaSet {
    fn default() -> Self {
        Self(crate::config::DEFAULT_DELTA_SET.to_string())
    }
}

impl<'de> Deserialize<'de> for DeltaSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DeltaSet::try_new(s).ok_or_else(|| serde::de::Error::custom("delta_set must not be empty"))
    }
}

impl fmt::Display for DeltaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeltaSet {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for DeltaSet {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for DeltaSet {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
