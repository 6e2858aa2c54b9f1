//! Migration selection criteria

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Which migrations a run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCriteria {
    /// Every migration file in the directory, ignoring history
    All,
    /// Files whose migration name has no history record
    Pending,
    /// Migrations recorded under the given batch number
    Batch(i64),
}

impl SelectionCriteria {
    /// Build criteria from the `--all` / `--batch` flags.
    ///
    /// Both flags together are rejected before any other work happens.
    pub fn from_flags(all: bool, batch: Option<i64>) -> CoreResult<Self> {
        match (all, batch) {
            (true, Some(_)) => Err(CoreError::ConflictingOptions),
            (true, None) => Ok(Self::All),
            (false, Some(n)) => Ok(Self::Batch(n)),
            (false, None) => Ok(Self::Pending),
        }
    }
}

impl fmt::Display for SelectionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionCriteria::All => write!(f, "all"),
            SelectionCriteria::Pending => write!(f, "pending"),
            SelectionCriteria::Batch(n) => write!(f, "batch {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(
            SelectionCriteria::from_flags(false, None).unwrap(),
            SelectionCriteria::Pending
        );
    }

    #[test]
    fn test_all_flag() {
        assert_eq!(
            SelectionCriteria::from_flags(true, None).unwrap(),
            SelectionCriteria::All
        );
    }

    #[test]
    fn test_batch_flag() {
        assert_eq!(
            SelectionCriteria::from_flags(false, Some(3)).unwrap(),
            SelectionCriteria::Batch(3)
        );
    }

    #[test]
    fn test_all_and_batch_conflict() {
        for batch in [0, 1, 42, -1] {
            let err = SelectionCriteria::from_flags(true, Some(batch)).unwrap_err();
            assert!(matches!(err, CoreError::ConflictingOptions));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SelectionCriteria::All.to_string(), "all");
        assert_eq!(SelectionCriteria::Pending.to_string(), "pending");
        assert_eq!(SelectionCriteria::Batch(2).to_string(), "batch 2");
    }
}
