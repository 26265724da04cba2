use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use aurora_schemas::{FeatureName, HistoryRow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aurora")]
#[command(about = "AURORA BMI — daily market-breadth scoring pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline for one trading day.
    Run {
        /// Date to score, ISO-8601 (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Overwrite an existing result for this date instead of refusing.
        #[arg(long)]
        force: bool,

        /// Print the design-notes banner and per-feature interpretations
        /// in addition to the scored explanation.
        #[arg(long)]
        verbose: bool,

        /// Layered deployment config paths, merged in order. Without
        /// these, persisted state defaults to `./aurora-state`.
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Fixture data file for `aurora-ingest`'s deterministic data
        /// source. Defaults to `<persisted_state_root>/fixtures.json`.
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Run {
            date,
            force,
            verbose,
            config_paths,
            fixtures,
        } => run(date, force, verbose, config_paths, fixtures),
    }
}

fn run(
    date: Option<NaiveDate>,
    force: bool,
    verbose: bool,
    config_paths: Vec<String>,
    fixtures: Option<PathBuf>,
) -> Result<()> {
    let persisted_state_root = if config_paths.is_empty() {
        PathBuf::from("./aurora-state")
    } else {
        let path_refs: Vec<&str> = config_paths.iter().map(String::as_str).collect();
        let loaded = aurora_config::load_layered_yaml(&path_refs)?;
        tracing::info!(config_hash = %loaded.config_hash, "loaded deployment config");
        loaded.settings.persisted_state_root
    };

    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let history_path = persisted_state_root.join("history.csv");
    let audit_path = persisted_state_root.join("audit.jsonl");
    let fixtures_path = fixtures.unwrap_or_else(|| persisted_state_root.join("fixtures.json"));

    let history = aurora_history::load_history(&history_path)?;
    if !force && aurora_history::already_ran(&history, date) {
        bail!("already ran for {date}; pass --force to re-run");
    }

    let source = aurora_ingest::FixtureDataSource::from_json_file(&fixtures_path)
        .with_context(|| format!("load fixture data from {fixtures_path:?}"))?;
    let inputs = {
        use aurora_ingest::DataSource;
        source.fetch(date)?
    };

    let view = aurora_history::view_before(&history, date);
    tracing::info!(%date, history_days = view.len(), "running AURORA BMI pipeline");

    let result = aurora_score::calculate(inputs, &view)?;

    let row = to_history_row(&result);
    let updated = aurora_history::upsert(history, row);
    aurora_history::save_history(&history_path, &updated)?;

    let mut audit = aurora_audit::AuditWriter::open_or_resume(&audit_path)?;
    audit.append(&result)?;

    if verbose {
        println!("{}", aurora_score::DESIGN_NOTES);
        for component in &result.components {
            let interpretation = feature_interpretation(component.name, component.raw_value);
            println!("{}: {:.4} — {interpretation}", component.name, component.raw_value);
        }
        println!();
        println!("{}", aurora_score::format_component_breakdown(&result.components));
        println!();
    }

    println!("{}", aurora_score::format_summary(result.score, result.band, &result.components));
    println!();
    println!("{}", result.explanation);

    Ok(())
}

fn feature_interpretation(name: FeatureName, raw_value: f64) -> &'static str {
    match name {
        FeatureName::Vpb => aurora_features::vpb_interpretation(raw_value),
        FeatureName::Ipb => aurora_features::ipb_interpretation(raw_value),
        FeatureName::Sbc => aurora_features::sbc_interpretation(raw_value),
        FeatureName::Ipo => aurora_features::ipo_interpretation(raw_value),
    }
}

/// Projects a `BMIResult` into the persisted `HistoryRow` schema. The
/// component/zscore/raw/contribution columns are informational — the core
/// never reads them back, only `vpb`/`ipb`/`sbc`/`ipo`/`raw_composite`.
fn to_history_row(result: &aurora_schemas::BMIResult) -> HistoryRow {
    let mut row = HistoryRow::with_features(
        result.date,
        feature_raw(result, FeatureName::Vpb),
        feature_raw(result, FeatureName::Ipb),
        feature_raw(result, FeatureName::Sbc),
        feature_raw(result, FeatureName::Ipo),
    );
    row.raw_composite = Some(result.raw_composite);
    row.score = Some(result.score);
    row.band = Some(result.band.as_str().to_string());
    row.status = Some(result.status.as_str().to_string());
    row.explanation = Some(result.explanation.clone());

    for component in &result.components {
        let zscore = Some(component.zscore);
        let raw = Some(component.raw_value);
        let contribution = Some(component.contribution);
        match component.name {
            FeatureName::Vpb => {
                row.vpb_zscore = zscore;
                row.vpb_raw = raw;
                row.vpb_contribution = contribution;
            }
            FeatureName::Ipb => {
                row.ipb_zscore = zscore;
                row.ipb_raw = raw;
                row.ipb_contribution = contribution;
            }
            FeatureName::Sbc => {
                row.sbc_zscore = zscore;
                row.sbc_raw = raw;
                row.sbc_contribution = contribution;
            }
            FeatureName::Ipo => {
                row.ipo_zscore = zscore;
                row.ipo_raw = raw;
                row.ipo_contribution = contribution;
            }
        }
    }

    row
}

fn feature_raw(result: &aurora_schemas::BMIResult, name: FeatureName) -> Option<f64> {
    result.components.iter().find(|c| c.name == name).map(|c| c.raw_value)
}
