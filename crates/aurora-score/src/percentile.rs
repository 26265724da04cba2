//! C5 — Percentile Bounder. The *sole* mechanism that maps an unbounded
//! `raw_composite` into `[0, 100]`. Below `COMPOSITE_HISTORY_BOOTSTRAP_MIN`
//! observations there is no real distribution to rank against, so a
//! sigmoid stands in; above it, a strict-less percentile is computed and
//! softened only at the tails (`p <= 1` or `p >= 99`) to avoid hard
//! clamping to `{0, 100}`.

use aurora_baseline::CompositeHistory;
use aurora_schemas::COMPOSITE_HISTORY_BOOTSTRAP_MIN;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sample standard deviation (ddof=1). Callers only invoke this once
/// `values.len() >= 2`.
fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Returns the bounded score in `[0, 100]`. Does NOT append `raw_composite`
/// to `history` — per the causal ordering in spec.md §2/§5, that happens
/// only after the full day's computation succeeds, and is the caller's
/// responsibility.
pub fn bound(raw_composite: f64, history: &CompositeHistory) -> f64 {
    let values = history.values();
    let n = values.len();

    if n < COMPOSITE_HISTORY_BOOTSTRAP_MIN {
        let p_raw = sigmoid(0.5 * raw_composite) * 100.0;
        return 100.0 - p_raw;
    }

    let count_less = values.iter().filter(|&&x| x < raw_composite).count();
    let mut p = (count_less as f64 / n as f64) * 100.0;

    if p <= 1.0 || p >= 99.0 {
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = sample_std(&values, mean);
        if std > 0.0 {
            let p_sig = sigmoid((raw_composite - mean) / std) * 100.0;
            if p <= 1.0 {
                p = p_sig.clamp(1.0, 25.0);
            } else {
                p = p_sig.clamp(75.0, 99.0);
            }
        }
    }

    100.0 - p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_history(n: usize, low: f64, high: f64) -> CompositeHistory {
        let mut history = CompositeHistory::with_capacity(n.max(1));
        let step = if n > 1 { (high - low) / (n - 1) as f64 } else { 0.0 };
        for i in 0..n {
            history.append(low + step * i as f64).unwrap();
        }
        history
    }

    #[test]
    fn bootstrap_path_below_ten_observations() {
        let history = uniform_history(9, -0.1, 0.1);
        let score = bound(0.0, &history);
        // sigmoid(0.5 * 0) = 0.5 -> p_raw = 50 -> score = 50.
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn normal_path_at_ten_observations() {
        let history = uniform_history(10, -0.1, 0.1);
        let score = bound(0.0, &history);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn score_always_in_bounds() {
        let history = uniform_history(60, -0.3, 0.3);
        for c in [-100.0, -5.0, -0.3, 0.0, 0.3, 5.0, 100.0] {
            let score = bound(c, &history);
            assert!((0.0..=100.0).contains(&score), "score {score} out of bounds for c={c}");
        }
    }

    #[test]
    fn extreme_high_composite_edge_blends_into_green_tail() {
        let history = uniform_history(60, -0.3, 0.3);
        let score = bound(2.0, &history);
        // p ends up in [75, 99] before inversion, so score in [1, 25].
        assert!(score >= 1.0 && score <= 25.0, "score={score}");
    }

    #[test]
    fn extreme_low_composite_edge_blends_into_red_tail() {
        let history = uniform_history(60, -0.3, 0.3);
        let score = bound(-2.0, &history);
        assert!(score >= 75.0 && score <= 99.0, "score={score}");
    }

    #[test]
    fn never_hard_clamps_to_zero_or_hundred() {
        let history = uniform_history(60, -0.3, 0.3);
        for c in [-1000.0, 1000.0] {
            let score = bound(c, &history);
            assert!(score > 0.0 && score < 100.0, "score={score} for c={c}");
        }
    }
}
