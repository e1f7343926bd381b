//! Selection engine: decides which cataloged scripts still need to run.

use crate::catalog::{ChangeCatalog, ChangeFile};
use std::collections::BTreeSet;
use std::fmt;

/// Change numbers whose changelog row has a completion timestamp.
pub type AppliedSet = BTreeSet<i64>;

/// How pending scripts are chosen from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Only scripts numbered above the highest completed change (default)
    #[default]
    Sequential,
    /// Every script not individually marked complete, regardless of order
    CheckAll,
}

impl SelectionPolicy {
    /// Map the `checkall` flag onto a policy
    pub fn from_checkall(checkall: bool) -> Self {
        if checkall {
            SelectionPolicy::CheckAll
        } else {
            SelectionPolicy::Sequential
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Sequential => write!(f, "sequential"),
            SelectionPolicy::CheckAll => write!(f, "checkall"),
        }
    }
}

/// Highest completed change number, or 0 when nothing has completed.
pub fn last_applied(applied: &AppliedSet) -> i64 {
    applied.last().copied().unwrap_or(0)
}

/// Compute the scripts to run, in ascending change-number order.
///
/// `Sequential` keeps scripts numbered above `last_applied`; `CheckAll`
/// keeps scripts whose number is absent from `applied`, which can include
/// numbers below `last_applied`. Neither policy reorders the catalog.
pub fn select(
    policy: SelectionPolicy,
    catalog: &ChangeCatalog,
    applied: &AppliedSet,
    last_applied: i64,
) -> Vec<ChangeFile> {
    catalog
        .iter()
        .filter(|change| match policy {
            SelectionPolicy::Sequential => change.change_number > last_applied,
            SelectionPolicy::CheckAll => !applied.contains(&change.change_number),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
