//! The ordered anomaly report.

use serde::{Deserialize, Serialize};

use super::GroupKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub group: GroupKey,
    pub anomaly_count: usize,
}

/// Groups whose post-change-point anomaly count reached the threshold, in
/// processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalyReport {
    entries: Vec<ReportEntry>,
}

impl AnomalyReport {
    pub fn push(&mut self, group: GroupKey, anomaly_count: usize) {
        self.entries.push(ReportEntry {
            group,
            anomaly_count,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, group: &str) -> bool {
        self.count_for(group).is_some()
    }

    /// Anomaly count recorded for `group`.
    pub fn count_for(&self, group: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.group.as_str() == group)
            .map(|e| e.anomaly_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_insertion_order() {
        let mut report = AnomalyReport::default();
        assert!(report.is_empty());

        report.push(GroupKey::from("b"), 4);
        report.push(GroupKey::from("a"), 3);

        let groups: Vec<&str> = report.iter().map(|e| e.group.as_str()).collect();
        assert_eq!(groups, vec!["b", "a"]);
        assert_eq!(report.count_for("a"), Some(3));
        assert!(!report.contains("c"));
    }

    #[test]
    fn test_report_serializes_as_list() {
        let mut report = AnomalyReport::default();
        report.push(GroupKey::from("cell-1"), 5);
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"[{"group":"cell-1","anomaly_count":5}]"#
        );
    }
}
