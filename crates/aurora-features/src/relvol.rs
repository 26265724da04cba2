//! Helper for callers that must derive relative volume themselves (e.g.
//! `aurora-ingest`'s fixture builder) rather than receive it precomputed.
//! Not part of the scored IPO path, which consumes `rel_vol` directly.

/// `current / avg`, or `None` if `avg` is non-positive.
pub fn relative_volume(current_volume: f64, avg_volume: f64) -> Option<f64> {
    if avg_volume <= 0.0 {
        return None;
    }
    Some(current_volume / avg_volume)
}
