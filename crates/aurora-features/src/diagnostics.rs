//! Observational diagnostics. These are surfaced for human review but never
//! feed back into the score — see `aurora_score::explain` for how (or
//! whether) they show up in the explanation text.

use aurora_schemas::{DISTRIBUTION_COLLAPSE_HIGH, DISTRIBUTION_COLLAPSE_LOW};

/// True when the advance/decline issue ratio has collapsed to one side
/// (`> 0.90` or `< 0.10`), a sign that today's breadth reading may be
/// distorted by a market-wide event rather than organic participation.
pub fn distribution_collapse_warning(n_adv: Option<i64>, n_dec: Option<i64>) -> bool {
    let (Some(n_adv), Some(n_dec)) = (n_adv, n_dec) else {
        return false;
    };
    if n_adv < 0 || n_dec < 0 {
        return false;
    }
    let total = n_adv + n_dec;
    if total == 0 {
        return false;
    }
    let ratio = n_adv as f64 / total as f64;
    ratio > DISTRIBUTION_COLLAPSE_HIGH || ratio < DISTRIBUTION_COLLAPSE_LOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_extreme_ratios() {
        assert!(distribution_collapse_warning(Some(950), Some(50)));
        assert!(distribution_collapse_warning(Some(20), Some(980)));
    }

    #[test]
    fn does_not_flag_balanced_days() {
        assert!(!distribution_collapse_warning(Some(500), Some(500)));
    }

    #[test]
    fn missing_inputs_never_flag() {
        assert!(!distribution_collapse_warning(None, Some(10)));
    }
}
