//! aurora-testkit
//!
//! Shared fixture builders for scenario tests across the workspace: a
//! centered, jittered baseline of N observations (ready but not
//! degenerate), and a uniform composite-history spread. Mirrors the
//! teacher's `mqk-testkit` role — fixture loading, not assertions.

use aurora_baseline::CompositeHistory;
use aurora_schemas::HistoryRow;
use chrono::NaiveDate;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

/// `n` days of history with all four features centered at `center`,
/// alternating `+jitter`/`-jitter` so the baseline is ready but has a
/// nonzero std (rather than all identical values, which would force
/// every z-score to 0).
pub fn centered_history(n: u32, center: f64, jitter: f64) -> Vec<HistoryRow> {
    (1..=n)
        .map(|d| {
            let sign = if d % 2 == 0 { 1.0 } else { -1.0 };
            let v = center + sign * jitter;
            HistoryRow::with_features(date(d), Some(v), Some(v), Some(v), Some(v))
        })
        .collect()
}

/// Same as [`centered_history`], but only populating `VPB`/`IPB` (for
/// scenarios that need the divergence pair ready while leaving `SBC`/`IPO`
/// excluded).
pub fn vpb_ipb_centered_history(n: u32, center: f64, jitter: f64) -> Vec<HistoryRow> {
    (1..=n)
        .map(|d| {
            let sign = if d % 2 == 0 { 1.0 } else { -1.0 };
            let v = center + sign * jitter;
            HistoryRow::with_features(date(d), Some(v), Some(v), None, None)
        })
        .collect()
}

/// A `CompositeHistory` of `n` values evenly spread across `[low, high]`.
pub fn uniform_composite_history(n: usize, low: f64, high: f64) -> CompositeHistory {
    let mut history = CompositeHistory::with_capacity(n.max(1));
    let step = if n > 1 { (high - low) / (n - 1) as f64 } else { 0.0 };
    for i in 0..n {
        history.append(low + step * i as f64).expect("finite by construction");
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_baseline::BaselineSet;
    use aurora_schemas::{FeatureName, MIN_OBSERVATIONS, ROLLING_WINDOW};

    #[test]
    fn centered_history_yields_a_ready_baseline() {
        let rows = centered_history(25, 0.5, 0.02);
        let set = BaselineSet::rehydrate(ROLLING_WINDOW, MIN_OBSERVATIONS, &rows).unwrap();
        let read = set.read(FeatureName::Vpb);
        assert!(read.ready);
        assert!(read.std.unwrap() > 0.0);
    }

    #[test]
    fn uniform_composite_history_spans_the_range() {
        let history = uniform_composite_history(10, -0.3, 0.3);
        let values = history.values();
        assert_eq!(values.first().copied(), Some(-0.3));
        assert_eq!(values.last().copied(), Some(0.3));
    }
}
