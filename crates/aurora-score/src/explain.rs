//! C7 — Explanation Generator. Builds the structured rationale: a status
//! line, up to two primary drivers, an optional VPB/IPB divergence note,
//! and warnings. Four blocks, emitted in this fixed order, separated by a
//! single blank line — nothing here ever changes `score`.

use aurora_schemas::{
    BaselineStatus, Band, Direction, FeatureName, ScoreComponent, VPB_IPB_DIVERGENCE_WARN,
};

/// Phrase for a (feature, direction) pair, used by the "Primary Drivers"
/// block.
fn driver_phrase(name: FeatureName, direction: Direction) -> &'static str {
    use Direction::*;
    use FeatureName::*;
    match (name, direction) {
        (Vpb, Elevated) => "volume participation is elevated (money flowing into advances)",
        (Vpb, Depressed) => "volume participation is weak (money flowing into declines)",
        (Vpb, Neutral) => "volume participation is neutral",
        (Ipb, Elevated) => "issue breadth is strong (many stocks advancing)",
        (Ipb, Depressed) => "issue breadth is weak (many stocks declining)",
        (Ipb, Neutral) => "issue breadth is neutral",
        (Sbc, Elevated) => "structural breadth is strong (majority above key MAs)",
        (Sbc, Depressed) => "structural breadth is weak (minority above key MAs)",
        (Sbc, Neutral) => "structural breadth is neutral",
        (Ipo, Elevated) => "institutional participation is elevated (volume spikes detected)",
        (Ipo, Depressed) => "institutional participation is minimal",
        (Ipo, Neutral) => "institutional participation is normal",
    }
}

const NARROW_LEADERSHIP: &str = "VPB/IPB divergence indicates narrow, mega-cap driven leadership. \
Volume concentrated in few names while broader market participation lags.";

const BROAD_WEAK: &str = "VPB/IPB divergence indicates broad but weak participation. \
Many stocks participating but with relatively low volume.";

fn status_warning_text(status: BaselineStatus) -> &'static str {
    match status {
        BaselineStatus::Complete => "",
        BaselineStatus::Partial => "Some features excluded due to insufficient baseline history.",
        BaselineStatus::Insufficient => "Insufficient data for reliable calculation.",
    }
}

/// Top 2 components by `|zscore|`, bulleted, matching
/// `• <phrase> (<signed z>σ <arrow>)`.
fn format_drivers(components: &[ScoreComponent], n: usize) -> Vec<String> {
    let mut ranked: Vec<&ScoreComponent> = components.iter().collect();
    ranked.sort_by(|a, b| b.zscore.abs().partial_cmp(&a.zscore.abs()).unwrap());
    ranked
        .into_iter()
        .take(n)
        .map(|c| {
            let arrow = if c.zscore > 0.0 {
                "↑"
            } else if c.zscore < 0.0 {
                "↓"
            } else {
                "→"
            };
            format!(
                "• {} ({:+.1}σ {arrow})",
                driver_phrase(c.name, c.direction()),
                c.zscore
            )
        })
        .collect()
}

/// VPB/IPB divergence note, only when both are present and
/// `|z_VPB - z_IPB| > VPB_IPB_DIVERGENCE_WARN`. Purely diagnostic.
fn format_divergence(components: &[ScoreComponent]) -> Option<&'static str> {
    let vpb = components.iter().find(|c| c.name == FeatureName::Vpb)?.zscore;
    let ipb = components.iter().find(|c| c.name == FeatureName::Ipb)?.zscore;
    let divergence = vpb - ipb;
    if divergence.abs() <= VPB_IPB_DIVERGENCE_WARN {
        return None;
    }
    Some(if divergence > VPB_IPB_DIVERGENCE_WARN {
        NARROW_LEADERSHIP
    } else {
        BROAD_WEAK
    })
}

/// Builds the complete four-block explanation.
pub fn generate(
    band: Band,
    components: &[ScoreComponent],
    excluded: &[FeatureName],
    status: BaselineStatus,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("**Status:** {}", band.description()));

    let drivers = format_drivers(components, 2);
    if !drivers.is_empty() {
        lines.push(String::new());
        lines.push("**Primary Drivers:**".to_string());
        lines.extend(drivers);
    }

    if let Some(note) = format_divergence(components) {
        lines.push(String::new());
        lines.push(format!("**Note:** {note}"));
    }

    let warning_text = status_warning_text(status);
    if !warning_text.is_empty() || !excluded.is_empty() {
        lines.push(String::new());
        if !warning_text.is_empty() {
            lines.push(format!("**Warning:** {warning_text}"));
        }
        if !excluded.is_empty() {
            let names: Vec<String> = excluded.iter().map(|f| f.to_string()).collect();
            lines.push(format!("**Excluded:** {}", names.join(", ")));
        }
    }

    lines.join("\n")
}

/// Per-component magnitude share of the total absolute contribution, for
/// display only (never stored, never scored). Feature present in the
/// input but with zero total contribution yields a `0.0` share for every
/// component rather than dividing by zero.
pub fn contribution_shares(components: &[ScoreComponent]) -> Vec<(FeatureName, f64)> {
    let total: f64 = components.iter().map(|c| c.contribution.abs()).sum();
    components
        .iter()
        .map(|c| {
            let share = if total > 0.0 {
                c.contribution.abs() / total
            } else {
                0.0
            };
            (c.name, share)
        })
        .collect()
}

/// Multi-line per-component breakdown, for `--verbose` CLI output.
pub fn format_component_breakdown(components: &[ScoreComponent]) -> String {
    let mut lines = vec!["Component Breakdown:".to_string()];
    for c in components {
        let arrow = if c.zscore > 0.0 {
            "↑"
        } else if c.zscore < 0.0 {
            "↓"
        } else {
            "→"
        };
        lines.push(format!(
            "  {}: {:.4} (z={:+.2} {arrow}, weight={:.0}%, contribution={:+.4})",
            c.name,
            c.raw_value,
            c.zscore,
            c.weight * 100.0,
            c.contribution
        ));
    }
    lines.join("\n")
}

/// One-line summary, for `--verbose` CLI output.
pub fn format_summary(score: f64, band: Band, components: &[ScoreComponent]) -> String {
    let top = components
        .iter()
        .max_by(|a, b| a.zscore.abs().partial_cmp(&b.zscore.abs()).unwrap());
    let top_str = top.map(|c| format!(", led by {}", c.name)).unwrap_or_default();
    format!("AURORA BMI: {score:.1} ({band}){top_str}")
}

/// Static documentation banner describing the five core invariants, for
/// the CLI's `--verbose` output. Never interpolated into the scored
/// explanation.
pub const DESIGN_NOTES: &str = "\
AURORA BMI Design Notes:

1. Z-scores are NOT clipped at feature level. Extreme values (tail information)
   are preserved because crisis signals live in the tails.

2. Percentile ranking is the ONLY bounding mechanism. It naturally maps any
   composite score to [0, 100] while preserving relative ordering.

3. VPB and IPB correlate but measure different dimensions:
   - VPB: dollar-weighted (where is capital flowing?)
   - IPB: count-weighted (how broad is participation?)
   Their divergence is a MONITORED DIAGNOSTIC PROPERTY, not an error.

4. IPO uses a dual filter: stocks must exceed both their own Q90 threshold
   AND the universe median. This prevents small-cap noise and crisis saturation.

5. Lower score = healthier breadth (GREEN)
   Higher score = weaker breadth (RED)
";
