//! Structural Breadth Confirmation — average fraction of stocks above
//! their 50- and 200-day moving averages.
//!
//! A "slow" indicator that confirms whether the underlying market
//! structure supports today's VPB/IPB reading.

fn in_range(pct: f64) -> bool {
    (0.0..=100.0).contains(&pct)
}

/// Both present and in range: average of the two, scaled to `[0, 1]`.
/// Exactly one present and in range: that one alone (degraded mode — still
/// counts as present for normalization, per design). Absent if both
/// missing, or if any present value is out of `[0, 100]`.
pub fn calculate(pct_ma50: Option<f64>, pct_ma200: Option<f64>) -> Option<f64> {
    match (pct_ma50, pct_ma200) {
        (None, None) => None,
        (Some(a), Some(b)) => {
            if in_range(a) && in_range(b) {
                Some(((a + b) / 2.0) / 100.0)
            } else {
                None
            }
        }
        (Some(a), None) => in_range(a).then_some(a / 100.0),
        (None, Some(b)) => in_range(b).then_some(b / 100.0),
    }
}

/// Short qualitative read of a raw SBC value, for `--verbose` CLI output.
pub fn interpretation(sbc: f64) -> &'static str {
    let pct = sbc * 100.0;
    if pct > 70.0 {
        "strong structural breadth (majority above both MAs)"
    } else if pct > 55.0 {
        "moderately strong structural breadth"
    } else if pct > 45.0 {
        "neutral structural breadth"
    } else if pct > 30.0 {
        "moderately weak structural breadth"
    } else {
        "weak structural breadth (minority above MAs)"
    }
}
