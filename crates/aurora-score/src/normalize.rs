//! C3 — Normalizer. Turns today's `FeatureVector` plus the rolling
//! baselines into unbounded z-scores and an exclusion set. This is the
//! only place `|z|` is computed, and it is never clipped here or anywhere
//! downstream.

use std::collections::{BTreeMap, BTreeSet};

use aurora_baseline::BaselineSet;
use aurora_schemas::{BaselineStatus, FeatureName, FeatureVector};

/// Z-scores for the features that normalized today, in a deterministic
/// (feature-ordered) map.
pub type ZScoreSet = BTreeMap<FeatureName, f64>;

pub struct NormalizeResult {
    pub zscores: ZScoreSet,
    pub excluded: BTreeSet<FeatureName>,
    pub status: BaselineStatus,
}

/// For each feature: absent input or a not-yet-ready baseline excludes it;
/// otherwise `z = (value - mean) / std`, or `0` when `std == 0`.
pub fn normalize(features: &FeatureVector, baselines: &BaselineSet) -> NormalizeResult {
    let mut zscores = ZScoreSet::new();
    let mut excluded = BTreeSet::new();

    for feature in FeatureName::ALL {
        let Some(value) = features.get(feature) else {
            excluded.insert(feature);
            continue;
        };
        let read = baselines.read(feature);
        if !read.ready {
            excluded.insert(feature);
            continue;
        }
        let mean = read.mean.expect("ready baseline has a mean");
        let std = read.std.expect("ready baseline has a std");
        let z = if std > 0.0 { (value - mean) / std } else { 0.0 };
        zscores.insert(feature, z);
    }

    let status = BaselineStatus::from_excluded_count(excluded.len());
    NormalizeResult {
        zscores,
        excluded,
        status,
    }
}
