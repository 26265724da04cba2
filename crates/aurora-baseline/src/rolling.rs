//! Per-feature rolling baseline: a bounded FIFO of the last `window`
//! observations, recomputed fully on each read. `window`/`min_observations`
//! are small enough (63/21) that O(window) recomputation per append is
//! cheap and avoids the bookkeeping a streaming mean/variance would need.

use std::collections::VecDeque;

use aurora_schemas::{CoreError, FeatureName, HistoryRow, MIN_OBSERVATIONS, ROLLING_WINDOW};
use chrono::NaiveDate;

use crate::validate::validate_history_rows;

/// Snapshot of a baseline's current state, as needed by the normalizer (C3).
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineRead {
    pub ready: bool,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

/// A single feature's rolling window of raw values.
#[derive(Clone, Debug)]
pub struct RollingBaseline {
    feature: FeatureName,
    window: usize,
    min_observations: usize,
    values: VecDeque<(NaiveDate, f64)>,
}

impl RollingBaseline {
    pub fn new(feature: FeatureName) -> Self {
        Self::with_capacity(feature, ROLLING_WINDOW, MIN_OBSERVATIONS)
    }

    pub fn with_capacity(feature: FeatureName, window: usize, min_observations: usize) -> Self {
        Self {
            feature,
            window,
            min_observations,
            values: VecDeque::with_capacity(window),
        }
    }

    pub fn feature(&self) -> FeatureName {
        self.feature
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_ready(&self) -> bool {
        self.count() >= self.min_observations
    }

    /// Appends one day's raw value. Rejects a non-finite value, and rejects
    /// a date that does not strictly follow the last appended date — both
    /// are programming errors in the caller, not data-quality conditions.
    pub fn append(&mut self, date: NaiveDate, value: f64) -> Result<(), CoreError> {
        if !value.is_finite() {
            return Err(CoreError::HistoryConsistency {
                detail: format!("non-finite {} baseline observation on {date}", self.feature),
            });
        }
        if let Some((last_date, _)) = self.values.back() {
            if date <= *last_date {
                return Err(CoreError::HistoryConsistency {
                    detail: format!(
                        "{} baseline append out of order: {date} does not follow {last_date}",
                        self.feature
                    ),
                });
            }
        }
        self.values.push_back((date, value));
        if self.values.len() > self.window {
            self.values.pop_front();
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    fn mean_of(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (ddof=1). Callers only reach this once
    /// `is_ready()` holds, so `count() >= min_observations >= 2`.
    fn std_of(values: &[f64], mean: f64) -> f64 {
        let n = values.len();
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    }

    pub fn read(&self) -> BaselineRead {
        if !self.is_ready() {
            return BaselineRead {
                ready: false,
                count: self.count(),
                mean: None,
                std: None,
            };
        }
        let values: Vec<f64> = self.values.iter().map(|(_, v)| *v).collect();
        let mean = Self::mean_of(&values);
        let std = Self::std_of(&values, mean);
        BaselineRead {
            ready: true,
            count: self.count(),
            mean: Some(mean),
            std: Some(std),
        }
    }

    /// Rebuilds a baseline by replaying a `HistoryView`, skipping days on
    /// which this feature was absent (the Python original's behavior: a
    /// baseline only ever sees feature values that were actually computed).
    pub fn rehydrate(
        feature: FeatureName,
        window: usize,
        min_observations: usize,
        rows: &[HistoryRow],
    ) -> Result<Self, CoreError> {
        validate_history_rows(rows)?;
        let mut baseline = Self::with_capacity(feature, window, min_observations);
        for row in rows {
            let value = match feature {
                FeatureName::Vpb => row.vpb,
                FeatureName::Ipb => row.ipb,
                FeatureName::Sbc => row.sbc,
                FeatureName::Ipo => row.ipo,
            };
            if let Some(v) = value {
                baseline.append(row.date, v)?;
            }
        }
        Ok(baseline)
    }
}
