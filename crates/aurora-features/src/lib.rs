//! aurora-features
//!
//! C1 — Feature Calculators. Maps raw inputs for one trading day to the
//! four scalar breadth values in `[0, 1]`. Deterministic, pure logic. No
//! IO, no history, no time.
//!
//! The only thing here that can fail is [`validate`], which rejects a
//! non-finite input field outright (a programmatic-misuse case per the
//! core's error taxonomy). Every other absence — missing data, negative
//! volume/counts, a zero denominator, an out-of-range percentage — is the
//! *normal* path and yields `None`, not an error.

mod diagnostics;
mod ipb;
mod ipo;
mod relvol;
mod sbc;
mod vpb;

pub use diagnostics::distribution_collapse_warning;
pub use ipb::{calculate as calculate_ipb, interpretation as ipb_interpretation};
pub use ipo::{calculate as calculate_ipo, interpretation as ipo_interpretation, universe_median};
pub use relvol::relative_volume;
pub use sbc::{calculate as calculate_sbc, interpretation as sbc_interpretation};
pub use vpb::{calculate as calculate_vpb, interpretation as vpb_interpretation};

use aurora_schemas::{CoreError, FeatureInputs, FeatureVector};

/// Reject a `FeatureInputs` containing any non-finite number. This is the
/// one gate that turns "bad data" into a hard [`CoreError`] rather than an
/// absence: a NaN or infinite volume, count, or percentage cannot mean
/// anything — it indicates upstream corruption, not a normal missing day.
pub fn validate(inputs: &FeatureInputs) -> Result<(), CoreError> {
    let finite_opt = |label: &str, v: Option<f64>| -> Result<(), CoreError> {
        if let Some(v) = v {
            if !v.is_finite() {
                return Err(CoreError::InsufficientInput {
                    detail: format!("{label} is non-finite: {v}"),
                });
            }
        }
        Ok(())
    };

    finite_opt("v_adv", inputs.v_adv)?;
    finite_opt("v_dec", inputs.v_dec)?;
    finite_opt("pct_ma50", inputs.pct_ma50)?;
    finite_opt("pct_ma200", inputs.pct_ma200)?;
    finite_opt("universe_median", inputs.universe_median)?;

    for (i, rv) in inputs.rel_vol.iter().enumerate() {
        if !rv.is_finite() {
            return Err(CoreError::InsufficientInput {
                detail: format!("rel_vol[{i}] is non-finite: {rv}"),
            });
        }
    }
    if let Some(q90) = &inputs.rel_vol_q90 {
        for (i, t) in q90.iter().enumerate() {
            if !t.is_finite() {
                return Err(CoreError::InsufficientInput {
                    detail: format!("rel_vol_q90[{i}] is non-finite: {t}"),
                });
            }
        }
    }

    Ok(())
}

/// Run all four calculators over one day's inputs, after the finiteness
/// gate in [`validate`].
pub fn calculate_all(inputs: &FeatureInputs) -> Result<FeatureVector, CoreError> {
    validate(inputs)?;

    let rel_vol_q90 = inputs.rel_vol_q90.as_deref();

    Ok(FeatureVector {
        vpb: calculate_vpb(inputs.v_adv, inputs.v_dec),
        ipb: calculate_ipb(inputs.n_adv, inputs.n_dec),
        sbc: calculate_sbc(inputs.pct_ma50, inputs.pct_ma200),
        ipo: calculate_ipo(&inputs.rel_vol, rel_vol_q90, inputs.universe_median),
    })
}
