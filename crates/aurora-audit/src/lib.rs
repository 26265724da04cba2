//! aurora-audit
//!
//! Append-only, hash-chained JSONL log of each day's `BMIResult`, for
//! tamper-evident auditability independent of the CSV history file that
//! `aurora-history` maintains for the core to rehydrate from.
//!
//! One entry per calculated day, keyed by `date` (not a synthetic run id —
//! AURORA is one pipeline instance running once per trading day, so the
//! date is already the natural, unique key).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aurora_schemas::BMIResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// One hash-chained audit line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub seq: u64,
    pub date: NaiveDate,
    pub score: f64,
    pub band: String,
    pub status: String,
    pub raw_composite: f64,
    pub excluded_features: Vec<String>,
    pub hash_prev: Option<String>,
    pub hash_self: Option<String>,
}

impl AuditEntry {
    fn from_result(seq: u64, result: &BMIResult, hash_prev: Option<String>) -> Self {
        Self {
            seq,
            date: result.date,
            score: result.score,
            band: result.band.as_str().to_string(),
            status: result.status.as_str().to_string(),
            raw_composite: result.raw_composite,
            excluded_features: result.excluded_features.iter().map(|f| f.to_string()).collect(),
            hash_prev,
            hash_self: None,
        }
    }
}

/// Append-only, hash-chained writer.
pub struct AuditWriter {
    path: PathBuf,
    last_hash: Option<String>,
    seq: u64,
}

impl AuditWriter {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {parent:?}"))?;
        }
        Ok(Self {
            path,
            last_hash: None,
            seq: 0,
        })
    }

    /// Resumes an existing log: call after reading the last line's
    /// `hash_self`/`seq` so a restarted process continues the chain rather
    /// than starting a new one.
    pub fn resume(path: impl AsRef<Path>, last_hash: Option<String>, seq: u64) -> Result<Self> {
        let mut writer = Self::new(path)?;
        writer.last_hash = last_hash;
        writer.seq = seq;
        Ok(writer)
    }

    pub fn last_hash(&self) -> Option<String> {
        self.last_hash.clone()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Opens the log at `path`, resuming the hash chain from its last line
    /// if the file already exists, or starting fresh otherwise. This is
    /// what CLI-style callers that run once per process and exit should
    /// use, rather than `new`, which always starts an unchained log.
    pub fn open_or_resume(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Self::new(path_ref);
        }
        let content = fs::read_to_string(path_ref).with_context(|| format!("read audit log {path_ref:?}"))?;
        let last_line = content.lines().rev().find(|l| !l.trim().is_empty());
        match last_line {
            None => Self::new(path_ref),
            Some(line) => {
                let last: AuditEntry = serde_json::from_str(line).context("parse last audit entry")?;
                Self::resume(path_ref, last.hash_self, last.seq + 1)
            }
        }
    }

    /// Appends one day's result to the chain.
    pub fn append(&mut self, result: &BMIResult) -> Result<AuditEntry> {
        let mut entry = AuditEntry::from_result(self.seq, result, self.last_hash.clone());
        self.seq += 1;

        let self_hash = compute_entry_hash(&entry)?;
        entry.hash_self = Some(self_hash.clone());
        self.last_hash = Some(self_hash);

        let line = canonical_json_line(&entry)?;
        append_line(&self.path, &line)?;

        Ok(entry)
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open audit log {path:?}"))?;
    f.write_all(line.as_bytes()).context("write audit line")?;
    f.write_all(b"\n").context("write newline")?;
    Ok(())
}

fn canonical_json_line<T: Serialize>(v: &T) -> Result<String> {
    let raw = serde_json::to_value(v).context("serialize audit entry")?;
    let sorted = sort_keys(&raw);
    serde_json::to_string(&sorted).context("stringify audit entry")
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

/// Hashed over the entry's canonical JSON with `hash_self` cleared, to
/// avoid self-reference.
pub fn compute_entry_hash(entry: &AuditEntry) -> Result<String> {
    let mut clone = entry.clone();
    clone.hash_self = None;
    let canonical = canonical_json_line(&clone)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResult {
    Valid { lines: usize },
    Broken { line: usize, reason: String },
}

pub fn verify_hash_chain(path: impl AsRef<Path>) -> Result<VerifyResult> {
    let content = fs::read_to_string(path.as_ref()).with_context(|| format!("read audit log {:?}", path.as_ref()))?;
    verify_hash_chain_str(&content)
}

pub fn verify_hash_chain_str(content: &str) -> Result<VerifyResult> {
    let mut prev_hash: Option<String> = None;
    let mut line_count = 0usize;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let entry: AuditEntry =
            serde_json::from_str(trimmed).with_context(|| format!("parse audit entry at line {}", i + 1))?;
        line_count += 1;

        if entry.hash_prev != prev_hash {
            return Ok(VerifyResult::Broken {
                line: i + 1,
                reason: format!("hash_prev mismatch: expected {prev_hash:?}, got {:?}", entry.hash_prev),
            });
        }

        if let Some(ref claimed) = entry.hash_self {
            let recomputed = compute_entry_hash(&entry)?;
            if *claimed != recomputed {
                return Ok(VerifyResult::Broken {
                    line: i + 1,
                    reason: format!("hash_self mismatch: claimed {claimed}, recomputed {recomputed}"),
                });
            }
        }

        prev_hash = entry.hash_self.clone();
    }

    Ok(VerifyResult::Valid { lines: line_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_schemas::{Band, BaselineStatus};
    use chrono::NaiveDate;

    fn sample_result(date: NaiveDate, score: f64) -> BMIResult {
        BMIResult {
            date,
            score,
            band: Band::from_score(score),
            raw_composite: 0.0,
            status: BaselineStatus::Complete,
            excluded_features: vec![],
            components: vec![],
            explanation: "test".to_string(),
        }
    }

    #[test]
    fn append_and_verify_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut writer = AuditWriter::new(&path).unwrap();
        writer
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 20.0))
            .unwrap();
        writer
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 60.0))
            .unwrap();

        let result = verify_hash_chain(&path).unwrap();
        assert_eq!(result, VerifyResult::Valid { lines: 2 });
    }

    #[test]
    fn tampered_line_breaks_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut writer = AuditWriter::new(&path).unwrap();
        writer
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 20.0))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let tampered = content.replace("\"score\":20.0", "\"score\":99.0");
        fs::write(&path, tampered).unwrap();

        let result = verify_hash_chain(&path).unwrap();
        assert!(matches!(result, VerifyResult::Broken { .. }));
    }

    #[test]
    fn resume_continues_the_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut writer = AuditWriter::new(&path).unwrap();
        let first = writer
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 20.0))
            .unwrap();

        let mut resumed = AuditWriter::resume(&path, writer.last_hash(), writer.seq()).unwrap();
        resumed
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 60.0))
            .unwrap();

        let result = verify_hash_chain(&path).unwrap();
        assert_eq!(result, VerifyResult::Valid { lines: 2 });
        assert_eq!(first.seq, 0);
    }

    #[test]
    fn open_or_resume_starts_fresh_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let writer = AuditWriter::open_or_resume(&path).unwrap();
        assert_eq!(writer.seq(), 0);
        assert_eq!(writer.last_hash(), None);
    }

    #[test]
    fn open_or_resume_continues_an_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let mut writer = AuditWriter::new(&path).unwrap();
        writer
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 20.0))
            .unwrap();
        drop(writer);

        let mut reopened = AuditWriter::open_or_resume(&path).unwrap();
        assert_eq!(reopened.seq(), 1);
        reopened
            .append(&sample_result(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 60.0))
            .unwrap();

        let result = verify_hash_chain(&path).unwrap();
        assert_eq!(result, VerifyResult::Valid { lines: 2 });
    }
}
