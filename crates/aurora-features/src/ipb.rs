//! Issue Participation Breadth — count-weighted advance ratio.
//!
//! `IPB = n_adv / (n_adv + n_dec)`. Answers "how broad is participation?",
//! independent of how much capital is behind it.

/// Absence conditions mirror VPB's: missing, negative, or zero total.
pub fn calculate(n_adv: Option<i64>, n_dec: Option<i64>) -> Option<f64> {
    let (n_adv, n_dec) = (n_adv?, n_dec?);
    if n_adv < 0 || n_dec < 0 {
        return None;
    }
    let total = n_adv + n_dec;
    if total == 0 {
        return None;
    }
    Some(n_adv as f64 / total as f64)
}

/// Short qualitative read of a raw IPB value, for `--verbose` CLI output.
pub fn interpretation(ipb: f64) -> &'static str {
    if ipb > 0.7 {
        "strongly broad participation (many more advancers)"
    } else if ipb > 0.55 {
        "moderately broad participation"
    } else if ipb > 0.45 {
        "balanced breadth"
    } else if ipb > 0.3 {
        "moderately narrow participation"
    } else {
        "strongly narrow participation (many more decliners)"
    }
}
