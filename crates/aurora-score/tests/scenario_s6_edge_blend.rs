use aurora_baseline::CompositeHistory;

/// 60 past composite values uniformly spread across [-0.3, 0.3].
fn uniform_composite_history() -> CompositeHistory {
    let mut history = CompositeHistory::with_capacity(60);
    let step = 0.6 / 59.0;
    for i in 0..60 {
        history.append(-0.3 + step * i as f64).unwrap();
    }
    history
}

#[test]
fn scenario_edge_blend_avoids_hard_clamp_on_extreme_composite() {
    let history = uniform_composite_history();
    let score = aurora_score::bound_percentile(2.0, &history);

    // Strict-less percentile is 100 here (every history value is below
    // 2.0), which triggers the edge blend into the [75, 99] tail before
    // inversion -- final score lands in [1, 25], never hard-clamped to 0.
    assert!(score >= 1.0 && score <= 25.0, "score={score}");
    assert!(score > 0.0);
}
