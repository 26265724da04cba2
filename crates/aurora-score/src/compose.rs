//! C4 — Compositor. Weighted sum of present z-scores. Deliberately NOT
//! renormalized by the sum of used weights: missing features contribute
//! zero, which lowers the composite's magnitude rather than preserving it
//! — fewer signals means less confidence, so less deviation from neutral.

use aurora_schemas::{weight_of, FeatureName, FeatureVector, ScoreComponent};

use crate::normalize::ZScoreSet;

/// Returns `raw_composite` and the ordered component list (VPB/IPB/SBC/IPO
/// order, only features present in `zscores`).
pub fn compose(features: &FeatureVector, zscores: &ZScoreSet) -> (f64, Vec<ScoreComponent>) {
    let mut raw_composite = 0.0;
    let mut components = Vec::with_capacity(zscores.len());

    for feature in FeatureName::ALL {
        let Some(&zscore) = zscores.get(&feature) else {
            continue;
        };
        let raw_value = features
            .get(feature)
            .expect("a feature with a zscore must have been present");
        let weight = weight_of(feature);
        let contribution = weight * zscore;
        raw_composite += contribution;
        components.push(ScoreComponent {
            name: feature,
            weight,
            raw_value,
            zscore,
            contribution,
        });
    }

    (raw_composite, components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_components_yields_zero_composite() {
        let fv = FeatureVector::default();
        let zscores = ZScoreSet::new();
        let (raw, components) = compose(&fv, &zscores);
        assert_eq!(raw, 0.0);
        assert!(components.is_empty());
    }

    #[test]
    fn partial_set_is_not_renormalized() {
        let mut fv = FeatureVector::default();
        fv.set(FeatureName::Vpb, Some(0.8));
        let mut zscores = ZScoreSet::new();
        zscores.insert(FeatureName::Vpb, 2.0);
        let (raw, components) = compose(&fv, &zscores);
        // Only VPB's weighted contribution (0.30 * 2.0), NOT scaled up to
        // account for the other three weights being absent.
        assert!((raw - 0.60).abs() < 1e-12);
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn full_set_sums_all_contributions() {
        let mut fv = FeatureVector::default();
        for f in FeatureName::ALL {
            fv.set(f, Some(0.5));
        }
        let mut zscores = ZScoreSet::new();
        for f in FeatureName::ALL {
            zscores.insert(f, 1.0);
        }
        let (raw, components) = compose(&fv, &zscores);
        assert!((raw - 1.0).abs() < 1e-12);
        assert_eq!(components.len(), 4);
        assert_eq!(components[0].name, FeatureName::Vpb);
        assert_eq!(components[3].name, FeatureName::Ipo);
    }
}
