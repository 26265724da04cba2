//! aurora-ingest
//!
//! Upstream data acquisition, as a thin collaborator around the core: a
//! `DataSource` trait plus a deterministic, fixture-backed implementation.
//! Real vendor HTTP clients (Polygon, FMP, Unusual Whales) are explicitly
//! out of scope (spec.md §1's non-goals) — this crate exists so
//! `aurora-cli` has something concrete to depend on, the way the teacher's
//! broker/market-data crates sit between `mqk-cli` and the pure risk core.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use aurora_schemas::FeatureInputs;
use chrono::NaiveDate;
use serde::Deserialize;

/// Supplies one day's raw `FeatureInputs`. Implemented by the fixture
/// source here; a real implementation would hit vendor APIs, respecting
/// cache/rate-limit plumbing this crate deliberately does not model.
pub trait DataSource {
    fn fetch(&self, date: NaiveDate) -> Result<FeatureInputs>;
}

/// One day's raw fixture record, as read from a JSON fixture file.
#[derive(Debug, Clone, Deserialize)]
struct FixtureRow {
    v_adv: Option<f64>,
    v_dec: Option<f64>,
    n_adv: Option<i64>,
    n_dec: Option<i64>,
    pct_ma50: Option<f64>,
    pct_ma200: Option<f64>,
    #[serde(default)]
    rel_vol: Vec<f64>,
    #[serde(default)]
    rel_vol_q90: Option<Vec<f64>>,
    #[serde(default)]
    universe_median: Option<f64>,
}

impl FixtureRow {
    fn into_inputs(self, date: NaiveDate) -> FeatureInputs {
        FeatureInputs {
            date,
            v_adv: self.v_adv,
            v_dec: self.v_dec,
            n_adv: self.n_adv,
            n_dec: self.n_dec,
            pct_ma50: self.pct_ma50,
            pct_ma200: self.pct_ma200,
            rel_vol: self.rel_vol,
            rel_vol_q90: self.rel_vol_q90,
            universe_median: self.universe_median,
        }
    }
}

/// Deterministic `DataSource` backed by an in-memory, date-keyed fixture
/// set. No network, no clock — every `fetch` for a given date returns the
/// same `FeatureInputs` for the process's lifetime.
pub struct FixtureDataSource {
    rows: BTreeMap<NaiveDate, FeatureInputs>,
}

impl FixtureDataSource {
    pub fn from_map(rows: BTreeMap<NaiveDate, FeatureInputs>) -> Self {
        Self { rows }
    }

    /// Loads a JSON fixture file shaped as `{"2024-01-02": {...}, ...}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("read fixture file {path:?}"))?;
        let parsed: BTreeMap<NaiveDate, FixtureRow> =
            serde_json::from_str(&raw).with_context(|| format!("parse fixture file {path:?}"))?;
        let rows = parsed.into_iter().map(|(date, row)| (date, row.into_inputs(date))).collect();
        Ok(Self { rows })
    }
}

impl DataSource for FixtureDataSource {
    fn fetch(&self, date: NaiveDate) -> Result<FeatureInputs> {
        tracing::debug!(%date, "fetching fixture inputs");
        self.rows
            .get(&date)
            .cloned()
            .with_context(|| format!("no fixture data for {date}"))
    }
}

/// Derives a `rel_vol` vector from parallel current/average volume
/// vectors, for fixture builders that only have raw volumes on hand.
/// Stocks with a non-positive average volume are dropped rather than
/// included as `0.0`, since [`aurora_features::relative_volume`] treats
/// that as undefined.
pub fn build_rel_vol(current_volumes: &[f64], avg_volumes: &[f64]) -> Vec<f64> {
    current_volumes
        .iter()
        .zip(avg_volumes)
        .filter_map(|(&current, &avg)| aurora_features::relative_volume(current, avg))
        .collect()
}
