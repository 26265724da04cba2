//! Shared history-consistency gate. Both `RollingBaseline::rehydrate` and
//! `CompositeHistory::rehydrate` call this before replaying rows, so a
//! malformed `HistoryView` is rejected once, up front, rather than partway
//! through reconstructing state.

use aurora_schemas::{CoreError, HistoryRow};

/// Rejects a history slice that is not strictly increasing in date, or that
/// carries a non-finite `raw_composite` / feature value anywhere.
pub fn validate_history_rows(rows: &[HistoryRow]) -> Result<(), CoreError> {
    let mut prev: Option<chrono::NaiveDate> = None;
    for row in rows {
        if let Some(prev_date) = prev {
            if row.date <= prev_date {
                return Err(CoreError::HistoryConsistency {
                    detail: format!(
                        "history rows out of order: {} does not follow {}",
                        row.date, prev_date
                    ),
                });
            }
        }
        prev = Some(row.date);

        for (label, value) in [
            ("vpb", row.vpb),
            ("ipb", row.ipb),
            ("sbc", row.sbc),
            ("ipo", row.ipo),
            ("raw_composite", row.raw_composite),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(CoreError::HistoryConsistency {
                        detail: format!("non-finite {label} in history row dated {}", row.date),
                    });
                }
            }
        }
    }
    Ok(())
}
