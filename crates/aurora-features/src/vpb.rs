//! Volume Participation Breadth — dollar-weighted advance ratio.
//!
//! `VPB = v_adv / (v_adv + v_dec)`. Answers "where is the money going?".
//! Correlates with IPB but measures a different dimension (dollar-weighted
//! vs. count-weighted); their divergence is a monitored diagnostic, not an
//! error — see `aurora_score::explain`.

/// Absent when either input is missing, either is negative, or the total
/// is zero. No other failure modes.
pub fn calculate(v_adv: Option<f64>, v_dec: Option<f64>) -> Option<f64> {
    let (v_adv, v_dec) = (v_adv?, v_dec?);
    if v_adv < 0.0 || v_dec < 0.0 {
        return None;
    }
    let total = v_adv + v_dec;
    if total == 0.0 {
        return None;
    }
    Some(v_adv / total)
}

/// Short qualitative read of a raw VPB value, for `--verbose` CLI output.
/// Never consulted by scoring.
pub fn interpretation(vpb: f64) -> &'static str {
    if vpb > 0.7 {
        "strong volume participation in advancing stocks"
    } else if vpb > 0.55 {
        "moderate volume participation favoring advances"
    } else if vpb > 0.45 {
        "balanced volume participation"
    } else if vpb > 0.3 {
        "moderate volume participation favoring declines"
    } else {
        "strong volume participation in declining stocks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_split() {
        assert_eq!(calculate(Some(3.0), Some(1.0)), Some(0.75));
    }

    #[test]
    fn missing_input_is_absent() {
        assert_eq!(calculate(None, Some(1.0)), None);
        assert_eq!(calculate(Some(1.0), None), None);
    }

    #[test]
    fn negative_input_is_absent() {
        assert_eq!(calculate(Some(-1.0), Some(1.0)), None);
    }

    #[test]
    fn zero_total_is_absent() {
        assert_eq!(calculate(Some(0.0), Some(0.0)), None);
    }

    #[test]
    fn stays_in_unit_interval_whenever_defined() {
        for (adv, dec) in [(1.0, 0.0), (0.0, 1.0), (5.0, 5.0), (1e12, 1.0)] {
            let v = calculate(Some(adv), Some(dec)).unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
