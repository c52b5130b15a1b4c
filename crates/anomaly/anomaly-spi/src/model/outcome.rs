//! Run results.

use serde::{Deserialize, Serialize};

use super::{AnomalyReport, GroupKey};

/// A group whose fit or prediction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFailure {
    pub group: GroupKey,
    pub reason: String,
}

impl GroupFailure {
    pub fn new(group: GroupKey, reason: impl Into<String>) -> Self {
        Self {
            group,
            reason: reason.into(),
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub report: AnomalyReport,
    pub failures: Vec<GroupFailure>,
    /// Groups with fewer than two valid points.
    pub skipped: Vec<GroupKey>,
    /// Distinct groups enumerated.
    pub groups: usize,
}

impl RunOutcome {
    /// Groups that were fitted and scored.
    pub fn analysed(&self) -> usize {
        self.groups
            .saturating_sub(self.failures.len() + self.skipped.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysed_excludes_failed_and_skipped() {
        let outcome = RunOutcome {
            report: AnomalyReport::default(),
            failures: vec![GroupFailure::new(GroupKey::from("x"), "singular")],
            skipped: vec![GroupKey::from("y")],
            groups: 5,
        };
        assert_eq!(outcome.analysed(), 3);
    }
}
