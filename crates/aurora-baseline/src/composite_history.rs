//! Rolling window of raw composite values, consumed by the percentile
//! bounder (C5). Unlike `RollingBaseline`, there is no readiness gate here —
//! the bounder itself decides what to do below `COMPOSITE_HISTORY_BOOTSTRAP_MIN`
//! observations (sigmoid bootstrap).

use std::collections::VecDeque;

use aurora_schemas::{CoreError, HistoryRow, ROLLING_WINDOW};

use crate::validate::validate_history_rows;

#[derive(Clone, Debug)]
pub struct CompositeHistory {
    window: usize,
    values: VecDeque<f64>,
}

impl CompositeHistory {
    pub fn new() -> Self {
        Self::with_capacity(ROLLING_WINDOW)
    }

    pub fn with_capacity(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only, oldest-first snapshot of the window's raw composite
    /// values.
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn append(&mut self, value: f64) -> Result<(), CoreError> {
        if !value.is_finite() {
            return Err(CoreError::HistoryConsistency {
                detail: "non-finite raw composite value appended to history".to_string(),
            });
        }
        self.values.push_back(value);
        if self.values.len() > self.window {
            self.values.pop_front();
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn rehydrate(window: usize, rows: &[HistoryRow]) -> Result<Self, CoreError> {
        validate_history_rows(rows)?;
        let mut history = Self::with_capacity(window);
        for row in rows {
            if let Some(v) = row.raw_composite {
                history.append(v)?;
            }
        }
        Ok(history)
    }
}

impl Default for CompositeHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn append_and_evict() {
        let mut h = CompositeHistory::with_capacity(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            h.append(v).unwrap();
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.values(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn rejects_non_finite() {
        let mut h = CompositeHistory::new();
        assert!(h.append(f64::NAN).is_err());
    }

    #[test]
    fn rehydrate_skips_rows_without_composite() {
        let rows = vec![
            HistoryRow::with_features(date(1), None, None, None, None).with_composite(0.1),
            HistoryRow::with_features(date(2), None, None, None, None),
            HistoryRow::with_features(date(3), None, None, None, None).with_composite(0.3),
        ];
        let h = CompositeHistory::rehydrate(10, &rows).unwrap();
        assert_eq!(h.values(), vec![0.1, 0.3]);
    }

    #[test]
    fn rehydrate_rejects_malformed_history() {
        let rows = vec![
            HistoryRow::with_features(date(2), None, None, None, None).with_composite(0.1),
            HistoryRow::with_features(date(1), None, None, None, None).with_composite(0.2),
        ];
        assert!(CompositeHistory::rehydrate(10, &rows).is_err());
    }
}
