use aurora_schemas::{Band, FeatureInputs, HistoryRow};
use chrono::NaiveDate;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

/// 21 observations centered near VPB=0.5, IPB=0.5, SBC=0.5, IPO=0.1 with
/// modest, nonzero std, so the baselines are ready but not degenerate.
fn centered_history() -> Vec<HistoryRow> {
    (1..=21u32)
        .map(|d| {
            let jitter = if d % 2 == 0 { 0.02 } else { -0.02 };
            HistoryRow::with_features(
                date(d),
                Some(0.5 + jitter),
                Some(0.5 + jitter),
                Some(0.5 + jitter),
                Some(0.1 + jitter / 2.0),
            )
        })
        .collect()
}

#[test]
fn scenario_healthy_broad_market_classifies_green() {
    let history = centered_history();
    let mut inputs = FeatureInputs::empty(date(22));
    inputs.v_adv = Some(3e9);
    inputs.v_dec = Some(1e9);
    inputs.n_adv = Some(400);
    inputs.n_dec = Some(100);
    inputs.pct_ma50 = Some(75.0);
    inputs.pct_ma200 = Some(80.0);
    inputs.rel_vol = [2.1, 2.5, 2.8, 3.0, 2.2].repeat(20);

    let result = aurora_score::calculate(inputs, &history).unwrap();

    assert!((result.raw_composite) > 0.0);
    for c in &result.components {
        assert!(c.zscore > 0.0, "{:?} expected positive zscore", c.name);
    }
    assert!(result.score <= 25.0, "score={}", result.score);
    assert_eq!(result.band, Band::Green);
}
