//! aurora-history
//!
//! CSV-backed persistence of the `HistoryRow` schema (spec §6). The core
//! itself is format-agnostic — it only ever sees a `&[HistoryRow]` — so
//! this crate's only job is turning that slice into durable state on disk
//! and back, deduplicating by date (last-writer-wins) so re-running the
//! pipeline for an already-scored day is safe.
//!
//! Uses `csv` rather than the teacher's `sqlx`/Postgres stack: there is no
//! concurrent writer, no query surface beyond "give me every row", and no
//! network — a single cumulative file is the simplest correct persistence
//! for a once-a-day batch job (see DESIGN.md for the full justification).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use aurora_schemas::HistoryRow;
use chrono::NaiveDate;

/// Loads the cumulative history file, sorted ascending by date. Returns an
/// empty history if the file does not exist yet (first run).
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<HistoryRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("open history csv: {path:?}"))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: HistoryRow = record.with_context(|| format!("parse history row in {path:?}"))?;
        rows.push(row);
    }
    Ok(dedupe_by_date(rows))
}

/// Writes the full history back out, deduplicated and sorted ascending by
/// date. Overwrites the file; callers pass the full in-memory set, not a
/// diff.
pub fn save_history(path: impl AsRef<Path>, rows: &[HistoryRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create_dir_all {parent:?}"))?;
    }
    let sorted = dedupe_by_date(rows.to_vec());
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("open history csv for write: {path:?}"))?;
    for row in &sorted {
        writer.serialize(row).context("serialize history row")?;
    }
    writer.flush().context("flush history csv")?;
    Ok(())
}

/// Inserts or replaces `row` by date (last-writer-wins), returning the
/// updated, sorted set. This is how `--force` re-runs overwrite a
/// previously-scored day without leaving a duplicate row behind.
pub fn upsert(mut rows: Vec<HistoryRow>, row: HistoryRow) -> Vec<HistoryRow> {
    rows.retain(|r| r.date != row.date);
    rows.push(row);
    dedupe_by_date(rows)
}

/// Whether `date` already has a row in `rows` — the `--force` guard.
pub fn already_ran(rows: &[HistoryRow], date: NaiveDate) -> bool {
    rows.iter().any(|r| r.date == date)
}

/// The `HistoryView` the core consumes: every row strictly dated before
/// `date`, ascending.
pub fn view_before(rows: &[HistoryRow], date: NaiveDate) -> Vec<HistoryRow> {
    rows.iter().filter(|r| r.date < date).cloned().collect()
}

fn dedupe_by_date(rows: Vec<HistoryRow>) -> Vec<HistoryRow> {
    let mut by_date: BTreeMap<NaiveDate, HistoryRow> = BTreeMap::new();
    for row in rows {
        by_date.insert(row.date, row);
    }
    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn load_missing_file_is_empty() {
        let rows = load_history("/nonexistent/path/history.csv").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn round_trips_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");

        let rows = vec![
            HistoryRow::with_features(date(1), Some(0.5), Some(0.6), None, None).with_composite(0.1),
            HistoryRow::with_features(date(2), Some(0.55), None, Some(0.7), Some(0.2)),
        ];
        save_history(&path, &rows).unwrap();
        let loaded = load_history(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].date, date(1));
        assert_eq!(loaded[0].raw_composite, Some(0.1));
        assert_eq!(loaded[1].vpb, Some(0.55));
    }

    #[test]
    fn upsert_replaces_same_date_last_writer_wins() {
        let rows = vec![HistoryRow::with_features(date(1), Some(0.1), None, None, None)];
        let replaced = upsert(rows, HistoryRow::with_features(date(1), Some(0.9), None, None, None));
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].vpb, Some(0.9));
    }

    #[test]
    fn view_before_excludes_same_and_later_dates() {
        let rows = vec![
            HistoryRow::with_features(date(1), None, None, None, None),
            HistoryRow::with_features(date(2), None, None, None, None),
            HistoryRow::with_features(date(3), None, None, None, None),
        ];
        let view = view_before(&rows, date(2));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].date, date(1));
    }

    #[test]
    fn already_ran_detects_existing_date() {
        let rows = vec![HistoryRow::with_features(date(1), None, None, None, None)];
        assert!(already_ran(&rows, date(1)));
        assert!(!already_ran(&rows, date(2)));
    }
}
