use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four breadth features. A closed set, not a string — any switch over
/// it is exhaustive at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureName {
    Vpb,
    Ipb,
    Sbc,
    Ipo,
}

impl FeatureName {
    /// All four, in the fixed VPB/IPB/SBC/IPO order used throughout scoring
    /// and explanation output.
    pub const ALL: [FeatureName; 4] = [
        FeatureName::Vpb,
        FeatureName::Ipb,
        FeatureName::Sbc,
        FeatureName::Ipo,
    ];
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureName::Vpb => "VPB",
            FeatureName::Ipb => "IPB",
            FeatureName::Sbc => "SBC",
            FeatureName::Ipo => "IPO",
        };
        f.write_str(s)
    }
}

/// Raw per-day inputs consumed by the four feature calculators (C1).
///
/// None of these fields are validated here — that is `aurora-features`'
/// job. This type only carries the data across the `calculate()` boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureInputs {
    pub date: NaiveDate,

    /// Advancing / declining dollar volume (VPB inputs).
    pub v_adv: Option<f64>,
    pub v_dec: Option<f64>,

    /// Advancing / declining issue counts (IPB inputs).
    pub n_adv: Option<i64>,
    pub n_dec: Option<i64>,

    /// Percentage of stocks above 50-/200-day moving averages (SBC inputs).
    pub pct_ma50: Option<f64>,
    pub pct_ma200: Option<f64>,

    /// Per-stock relative volume (today's volume / 20-day mean volume).
    pub rel_vol: Vec<f64>,
    /// Per-stock 90th-percentile relative-volume threshold, same order and
    /// length as `rel_vol` if supplied.
    pub rel_vol_q90: Option<Vec<f64>>,
    /// Precomputed cross-sectional median of `rel_vol`, if the caller
    /// already has it; otherwise it is derived from `rel_vol`.
    pub universe_median: Option<f64>,
}

impl FeatureInputs {
    /// A bare input record with every optional field absent, for tests and
    /// for building up one field at a time.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            v_adv: None,
            v_dec: None,
            n_adv: None,
            n_dec: None,
            pct_ma50: None,
            pct_ma200: None,
            rel_vol: Vec::new(),
            rel_vol_q90: None,
            universe_median: None,
        }
    }
}

/// The four raw feature values for one day, each in `[0, 1]` or absent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub vpb: Option<f64>,
    pub ipb: Option<f64>,
    pub sbc: Option<f64>,
    pub ipo: Option<f64>,
}

impl FeatureVector {
    pub fn get(&self, name: FeatureName) -> Option<f64> {
        match name {
            FeatureName::Vpb => self.vpb,
            FeatureName::Ipb => self.ipb,
            FeatureName::Sbc => self.sbc,
            FeatureName::Ipo => self.ipo,
        }
    }

    pub fn set(&mut self, name: FeatureName, value: Option<f64>) {
        match name {
            FeatureName::Vpb => self.vpb = value,
            FeatureName::Ipb => self.ipb = value,
            FeatureName::Sbc => self.sbc = value,
            FeatureName::Ipo => self.ipo = value,
        }
    }
}

/// Completeness of today's baseline normalization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineStatus {
    /// All four features normalized.
    Complete,
    /// At least one, but not all four, normalized.
    Partial,
    /// None normalized.
    Insufficient,
}

impl BaselineStatus {
    pub fn from_excluded_count(excluded: usize) -> Self {
        match excluded {
            0 => BaselineStatus::Complete,
            4 => BaselineStatus::Insufficient,
            _ => BaselineStatus::Partial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaselineStatus::Complete => "COMPLETE",
            BaselineStatus::Partial => "PARTIAL",
            BaselineStatus::Insufficient => "INSUFFICIENT",
        }
    }
}

/// AURORA's four interpretation bands. Ordered GREEN < LIGHT_GREEN < YELLOW
/// < RED so that `band(s1) <= band(s2)` whenever `s1 <= s2` (I6).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    Green,
    LightGreen,
    Yellow,
    Red,
}

impl Band {
    /// Boundary values belong to the lower band (half-open upward).
    pub fn from_score(score: f64) -> Self {
        if score <= crate::BAND_GREEN_MAX {
            Band::Green
        } else if score <= crate::BAND_LIGHT_GREEN_MAX {
            Band::LightGreen
        } else if score <= crate::BAND_YELLOW_MAX {
            Band::Yellow
        } else {
            Band::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Green => "GREEN",
            Band::LightGreen => "LIGHT_GREEN",
            Band::Yellow => "YELLOW",
            Band::Red => "RED",
        }
    }

    /// Headline description used by the explanation generator.
    pub fn description(&self) -> &'static str {
        match self {
            Band::Green => "Market breadth is healthy with strong, broad-based participation.",
            Band::LightGreen => "Market breadth shows moderate participation.",
            Band::Yellow => "Market breadth is weakening, participation declining.",
            Band::Red => "Market breadth is poor with narrow participation.",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative direction of a z-score, used to pick an explanation phrase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Elevated,
    Depressed,
    Neutral,
}

/// One component of the composite score: a feature's weight, raw value,
/// z-score, and its weighted contribution. Immutable once built.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: FeatureName,
    pub weight: f64,
    pub raw_value: f64,
    /// NOT clipped — preserves tail information.
    pub zscore: f64,
    pub contribution: f64,
}

impl ScoreComponent {
    pub fn direction(&self) -> Direction {
        if self.zscore > 0.5 {
            Direction::Elevated
        } else if self.zscore < -0.5 {
            Direction::Depressed
        } else {
            Direction::Neutral
        }
    }

    /// Magnitude of this component's contribution, expressed as a
    /// percentage point value (not normalized against other components —
    /// see `aurora_score::explain::contribution_shares` for that).
    pub fn contribution_pct(&self) -> f64 {
        self.contribution.abs() * 100.0
    }
}

/// Immutable result of one day's AURORA BMI calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BMIResult {
    pub date: NaiveDate,
    /// AURORA score in `[0, 100]`. Lower = healthier breadth.
    pub score: f64,
    pub band: Band,
    pub raw_composite: f64,
    pub status: BaselineStatus,
    /// Features excluded from normalization today, in VPB/IPB/SBC/IPO order.
    pub excluded_features: Vec<FeatureName>,
    /// Only the features that were present, in VPB/IPB/SBC/IPO order.
    pub components: Vec<ScoreComponent>,
    pub explanation: String,
}

impl BMIResult {
    /// Whether this result falls in one of the two "healthy" bands.
    pub fn is_healthy(&self) -> bool {
        matches!(self.band, Band::Green | Band::LightGreen)
    }

    /// VPB minus IPB z-score, if both were present. Diagnostic only — never
    /// influences `score`.
    pub fn vpb_ipb_divergence(&self) -> Option<f64> {
        let vpb = self
            .components
            .iter()
            .find(|c| c.name == FeatureName::Vpb)?
            .zscore;
        let ipb = self
            .components
            .iter()
            .find(|c| c.name == FeatureName::Ipb)?
            .zscore;
        Some(vpb - ipb)
    }
}
