//! Exposure history — append-only, scoped to one simulation run.

use crate::event::HistoryRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in arrival order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn high_risk_count(&self, threshold: f64) -> usize {
        count_high_risk(&self.records, threshold)
    }
}

impl From<Vec<HistoryRecord>> for History {
    fn from(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }
}

/// Number of records whose risk is at or above `threshold`.
pub fn count_high_risk(records: &[HistoryRecord], threshold: f64) -> usize {
    records
        .iter()
        .filter(|r| r.risk_or_zero() >= threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let history = History::from(vec![
            HistoryRecord::with_risk(79.0),
            HistoryRecord::with_risk(80.0),
            HistoryRecord::with_risk(100.0),
            HistoryRecord::default(),
        ]);
        assert_eq!(history.len(), 4);
        assert_eq!(history.high_risk_count(80.0), 2);
    }

    #[test]
    fn push_preserves_arrival_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        history.push(HistoryRecord::with_risk(91.0));
        history.push(HistoryRecord::with_risk(83.0));
        let risks: Vec<f64> = history.records().iter().map(|r| r.risk_or_zero()).collect();
        assert_eq!(risks, vec![91.0, 83.0]);
    }
}
