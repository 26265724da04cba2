//! Frozen design constants.
//!
//! These are conceptual allocations, not fitted parameters. Nothing in the
//! workspace makes them configurable at runtime (see `aurora-config`, which
//! loads deployment-only settings and deliberately does not touch these).

use crate::FeatureName;

/// Composite weight for VPB.
pub const WEIGHT_VPB: f64 = 0.30;
/// Composite weight for IPB.
pub const WEIGHT_IPB: f64 = 0.25;
/// Composite weight for SBC.
pub const WEIGHT_SBC: f64 = 0.25;
/// Composite weight for IPO.
pub const WEIGHT_IPO: f64 = 0.20;

/// Weight lookup in a fixed, deterministic order (VPB, IPB, SBC, IPO).
pub const WEIGHTS: [(FeatureName, f64); 4] = [
    (FeatureName::Vpb, WEIGHT_VPB),
    (FeatureName::Ipb, WEIGHT_IPB),
    (FeatureName::Sbc, WEIGHT_SBC),
    (FeatureName::Ipo, WEIGHT_IPO),
];

/// Returns the frozen weight for a feature.
pub fn weight_of(name: FeatureName) -> f64 {
    match name {
        FeatureName::Vpb => WEIGHT_VPB,
        FeatureName::Ipb => WEIGHT_IPB,
        FeatureName::Sbc => WEIGHT_SBC,
        FeatureName::Ipo => WEIGHT_IPO,
    }
}

/// Rolling baseline / composite history capacity (trading days).
pub const ROLLING_WINDOW: usize = 63;

/// Minimum observations before a baseline is `ready`.
pub const MIN_OBSERVATIONS: usize = 21;

/// History size below which the percentile bounder falls back to the
/// sigmoid bootstrap instead of ranking against history.
pub const COMPOSITE_HISTORY_BOOTSTRAP_MIN: usize = 10;

/// IPO's own-history percentile threshold (informational; the fallback
/// below is what actually gets applied when `rel_vol_q90` is absent).
pub const IPO_PERCENTILE_THRESHOLD: f64 = 90.0;

/// Fixed per-stock relative-volume threshold used when no Q90 is supplied.
pub const IPO_FALLBACK_THRESHOLD: f64 = 2.0;

/// VPB/IPB divergence magnitude above which the explanation notes it.
pub const VPB_IPB_DIVERGENCE_WARN: f64 = 1.0;

/// Distribution-collapse diagnostic bounds on IPB (observed, never scored).
pub const DISTRIBUTION_COLLAPSE_HIGH: f64 = 0.90;
pub const DISTRIBUTION_COLLAPSE_LOW: f64 = 0.10;

/// Band boundary: score <= this is GREEN.
pub const BAND_GREEN_MAX: f64 = 25.0;
/// Band boundary: score <= this is LIGHT_GREEN (and > `BAND_GREEN_MAX`).
pub const BAND_LIGHT_GREEN_MAX: f64 = 50.0;
/// Band boundary: score <= this is YELLOW (and > `BAND_LIGHT_GREEN_MAX`).
pub const BAND_YELLOW_MAX: f64 = 75.0;
