use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the persisted history file (spec §6). Column-major,
/// one row per trading day. `aurora-history` reads/writes these; the core
/// only ever sees them via a `HistoryView` (`&[HistoryRow]`), strictly
/// dated before the day being scored.
///
/// The `score`/`band`/`status`/`explanation`/`*_zscore`/`*_raw`/
/// `*_contribution` columns are informational — written for auditability,
/// never read back by the core, which recomputes everything it needs from
/// `vpb`/`ipb`/`sbc`/`ipo`/`raw_composite`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,

    pub vpb: Option<f64>,
    pub ipb: Option<f64>,
    pub sbc: Option<f64>,
    pub ipo: Option<f64>,

    pub raw_composite: Option<f64>,

    pub score: Option<f64>,
    pub band: Option<String>,
    pub status: Option<String>,
    pub explanation: Option<String>,

    pub vpb_zscore: Option<f64>,
    pub vpb_raw: Option<f64>,
    pub vpb_contribution: Option<f64>,

    pub ipb_zscore: Option<f64>,
    pub ipb_raw: Option<f64>,
    pub ipb_contribution: Option<f64>,

    pub sbc_zscore: Option<f64>,
    pub sbc_raw: Option<f64>,
    pub sbc_contribution: Option<f64>,

    pub ipo_zscore: Option<f64>,
    pub ipo_raw: Option<f64>,
    pub ipo_contribution: Option<f64>,
}

impl HistoryRow {
    /// A row with only the date set, for tests that just need baseline
    /// feature values.
    pub fn with_features(
        date: NaiveDate,
        vpb: Option<f64>,
        ipb: Option<f64>,
        sbc: Option<f64>,
        ipo: Option<f64>,
    ) -> Self {
        Self {
            date,
            vpb,
            ipb,
            sbc,
            ipo,
            raw_composite: None,
            score: None,
            band: None,
            status: None,
            explanation: None,
            vpb_zscore: None,
            vpb_raw: None,
            vpb_contribution: None,
            ipb_zscore: None,
            ipb_raw: None,
            ipb_contribution: None,
            sbc_zscore: None,
            sbc_raw: None,
            sbc_contribution: None,
            ipo_zscore: None,
            ipo_raw: None,
            ipo_contribution: None,
        }
    }

    /// A row with `raw_composite` set in addition to features (for
    /// `CompositeHistory` rehydration tests).
    pub fn with_composite(mut self, raw_composite: f64) -> Self {
        self.raw_composite = Some(raw_composite);
        self
    }
}
