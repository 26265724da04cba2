//! aurora-score
//!
//! C3 Normalizer, C4 Compositor, C5 Percentile Bounder, C6 Band Classifier
//! (the classifier itself lives as `Band::from_score` in `aurora-schemas`;
//! this crate only calls it), and C7 Explanation Generator, wired together
//! by [`calculate`], the core's sole entry point.

mod compose;
mod explain;
mod normalize;
mod percentile;
mod pipeline;

pub use compose::compose;
pub use explain::{
    contribution_shares, format_component_breakdown, format_summary, generate as explain,
    DESIGN_NOTES,
};
pub use normalize::{normalize, NormalizeResult, ZScoreSet};
pub use percentile::bound as bound_percentile;
pub use pipeline::calculate;
