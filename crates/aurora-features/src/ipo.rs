//! Institutional Participation Overlay — dual-filter volume-spike breadth.
//!
//! A stock "spikes" iff its relative volume exceeds both its own Q90
//! threshold (unusual for that stock) AND the cross-sectional median
//! (unusual for the market that day). Either filter alone saturates during
//! broad market stress; the AND is what keeps IPO meaningful in a crisis.

use aurora_schemas::IPO_FALLBACK_THRESHOLD;

/// Standard median (average of the two middle order statistics when the
/// count is even).
pub fn universe_median(values: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("non-finite values are rejected upstream"));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Absent iff `rel_vol` is empty, or the supplied per-stock threshold
/// vector's length does not match `rel_vol`'s.
pub fn calculate(
    rel_vol: &[f64],
    rel_vol_q90: Option<&[f64]>,
    universe_median_input: Option<f64>,
) -> Option<f64> {
    let n = rel_vol.len();
    if n == 0 {
        return None;
    }
    if let Some(q90) = rel_vol_q90 {
        if q90.len() != n {
            return None;
        }
    }

    let median = universe_median_input.unwrap_or_else(|| universe_median(rel_vol));

    let spike_count = rel_vol
        .iter()
        .enumerate()
        .filter(|(i, &rv)| {
            let threshold = rel_vol_q90.map(|q| q[*i]).unwrap_or(IPO_FALLBACK_THRESHOLD);
            rv > threshold && rv > median
        })
        .count();

    Some(spike_count as f64 / n as f64)
}

/// Short qualitative read of a raw IPO value, for `--verbose` CLI output.
pub fn interpretation(ipo: f64) -> &'static str {
    let pct = ipo * 100.0;
    if pct > 20.0 {
        "high institutional participation (many stocks with volume spikes)"
    } else if pct > 10.0 {
        "elevated institutional participation"
    } else if pct > 5.0 {
        "moderate institutional participation"
    } else if pct > 2.0 {
        "low institutional participation"
    } else {
        "minimal institutional participation (retail-dominated)"
    }
}
