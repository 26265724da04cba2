//! Bundles the four per-feature baselines so `aurora-score` can rehydrate
//! and consult them as one unit, mirroring the Python original's
//! `MultiFeatureRollingCalculator`.

use std::collections::BTreeMap;

use aurora_schemas::{CoreError, FeatureName, FeatureVector, HistoryRow, MIN_OBSERVATIONS, ROLLING_WINDOW};

use crate::rolling::{BaselineRead, RollingBaseline};

/// One `RollingBaseline` per feature, keyed in a `BTreeMap` so iteration is
/// always in the fixed VPB/IPB/SBC/IPO order.
#[derive(Clone, Debug)]
pub struct BaselineSet {
    baselines: BTreeMap<FeatureName, RollingBaseline>,
}

impl BaselineSet {
    pub fn new() -> Self {
        Self::with_capacity(ROLLING_WINDOW, MIN_OBSERVATIONS)
    }

    pub fn with_capacity(window: usize, min_observations: usize) -> Self {
        let baselines = FeatureName::ALL
            .into_iter()
            .map(|f| (f, RollingBaseline::with_capacity(f, window, min_observations)))
            .collect();
        Self { baselines }
    }

    pub fn read(&self, feature: FeatureName) -> BaselineRead {
        self.baselines
            .get(&feature)
            .expect("every FeatureName has an entry")
            .read()
    }

    /// Appends today's present features (absent ones are simply skipped, as
    /// the per-feature baseline never observes a day it didn't have a value
    /// for).
    pub fn append(
        &mut self,
        date: chrono::NaiveDate,
        features: &FeatureVector,
    ) -> Result<(), CoreError> {
        for feature in FeatureName::ALL {
            if let Some(value) = features.get(feature) {
                self.baselines
                    .get_mut(&feature)
                    .expect("every FeatureName has an entry")
                    .append(date, value)?;
            }
        }
        Ok(())
    }

    pub fn rehydrate(window: usize, min_observations: usize, rows: &[HistoryRow]) -> Result<Self, CoreError> {
        let mut baselines = BTreeMap::new();
        for feature in FeatureName::ALL {
            baselines.insert(
                feature,
                RollingBaseline::rehydrate(feature, window, min_observations, rows)?,
            );
        }
        Ok(Self { baselines })
    }
}

impl Default for BaselineSet {
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
    fn rehydrate_then_read_per_feature() {
        let rows = vec![
            HistoryRow::with_features(date(1), Some(0.1), Some(0.2), None, None),
            HistoryRow::with_features(date(2), Some(0.3), None, None, None),
        ];
        let set = BaselineSet::rehydrate(5, 1, &rows).unwrap();
        assert_eq!(set.read(FeatureName::Vpb).count, 2);
        assert_eq!(set.read(FeatureName::Ipb).count, 1);
        assert_eq!(set.read(FeatureName::Sbc).count, 0);
    }

    #[test]
    fn append_skips_absent_features() {
        let mut set = BaselineSet::with_capacity(5, 1);
        let mut fv = FeatureVector::default();
        fv.set(FeatureName::Vpb, Some(0.5));
        set.append(date(1), &fv).unwrap();
        assert_eq!(set.read(FeatureName::Vpb).count, 1);
        assert_eq!(set.read(FeatureName::Ipb).count, 0);
    }
}
