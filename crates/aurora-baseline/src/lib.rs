//! aurora-baseline
//!
//! C2: rolling per-feature baselines and the raw-composite history window
//! that `aurora-score` normalizes and bounds against. Pure state — no IO,
//! no clock, no knowledge of scoring math.

mod composite_history;
mod rolling;
mod set;
mod validate;

pub use composite_history::CompositeHistory;
pub use rolling::{BaselineRead, RollingBaseline};
pub use set::BaselineSet;
pub use validate::validate_history_rows;
