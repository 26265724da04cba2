use aurora_baseline::CompositeHistory;
use aurora_schemas::Band;

#[test]
fn scenario_b1_band_boundaries_belong_to_lower_band() {
    assert_eq!(Band::from_score(25.0), Band::Green);
    assert_eq!(Band::from_score(50.0), Band::LightGreen);
    assert_eq!(Band::from_score(75.0), Band::Yellow);
}

#[test]
fn scenario_b2_history_size_nine_bootstraps_ten_ranks() {
    let mut nine = CompositeHistory::with_capacity(9);
    for v in [-0.2, -0.1, 0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3] {
        nine.append(v).unwrap();
    }
    let bootstrap_score = aurora_score::bound_percentile(0.0, &nine);
    // Bootstrap path: score = 100 - sigmoid(0.5*c)*100, independent of
    // history contents.
    assert!((bootstrap_score - 50.0).abs() < 1e-9);

    let mut ten = CompositeHistory::with_capacity(10);
    for v in [-0.2, -0.1, 0.0, 0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3] {
        ten.append(v).unwrap();
    }
    let ranked_score = aurora_score::bound_percentile(0.0, &ten);
    // Normal path: rank-based, not the bootstrap formula.
    assert!((ranked_score - 50.0).abs() > 1e-9);
}
