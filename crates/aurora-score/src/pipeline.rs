//! The core's sole entry point: `calculate`. Stateless and synchronous —
//! every call rehydrates baselines and composite history fresh from
//! `history`, so a fixed `(inputs, history)` pair is bit-identical across
//! runs (I7/R1) and nothing here carries process state that isn't also
//! persisted.

use aurora_baseline::{BaselineSet, CompositeHistory};
use aurora_schemas::{Band, BMIResult, CoreError, FeatureInputs, HistoryRow, ROLLING_WINDOW};

use crate::compose::compose;
use crate::explain;
use crate::normalize::normalize;
use crate::percentile::bound;

/// Runs one trading day's full scoring pipeline.
///
/// `history` must be strictly dated before `inputs.date`; violating that
/// is a `HistoryConsistency` error, same as out-of-order or non-finite
/// rows within `history` itself.
pub fn calculate(inputs: FeatureInputs, history: &[HistoryRow]) -> Result<BMIResult, CoreError> {
    for row in history {
        if row.date >= inputs.date {
            return Err(CoreError::HistoryConsistency {
                detail: format!(
                    "history row dated {} is not strictly before inputs.date {}",
                    row.date, inputs.date
                ),
            });
        }
    }

    let features = aurora_features::calculate_all(&inputs)?;

    let baselines = BaselineSet::rehydrate(ROLLING_WINDOW, aurora_schemas::MIN_OBSERVATIONS, history)?;
    let composite_history = CompositeHistory::rehydrate(ROLLING_WINDOW, history)?;

    let normalized = normalize(&features, &baselines);
    let (raw_composite, components) = compose(&features, &normalized.zscores);
    let score = bound(raw_composite, &composite_history);
    let band = Band::from_score(score);

    let excluded_features: Vec<_> = normalized.excluded.into_iter().collect();
    let explanation = explain::generate(band, &components, &excluded_features, normalized.status);

    Ok(BMIResult {
        date: inputs.date,
        score,
        band,
        raw_composite,
        status: normalized.status,
        excluded_features,
        components,
        explanation,
    })
}
