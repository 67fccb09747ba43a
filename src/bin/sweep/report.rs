// Result Rendering: text lines or one JSON object per depth

use brw_engine::{DepthReport, LeafSample};
use serde::Serialize;

// ─── Text ───────────────────────────────────────────────────────────────────

pub fn sample_lines(samples: &[LeafSample]) -> Vec<String> {
    samples
        .iter()
        .map(|s| format!("Leaf {}: {}", s.index, s.sum))
        .collect()
}

/// `n = 5, E[M_n] = ..., Var(M_n) = ...`. Variance is clamped at zero here only.
pub fn result_line(report: &DepthReport) -> String {
    format!(
        "n = {}, E[M_n] = {}, Var(M_n) = {}",
        report.depth,
        report.statistics.mean,
        report.statistics.display_variance()
    )
}

pub fn timing_line(report: &DepthReport) -> String {
    format!(
        "Time taken: {:.3}s  (M_n range {:.4}..{:.4}, 95% CI {:.4}..{:.4})",
        report.elapsed_secs,
        report.summary.min,
        report.summary.max,
        report.summary.ci_lower,
        report.summary.ci_upper,
    )
}

// ─── JSON Lines ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DepthLine<'a> {
    pub n: u32,
    pub mean: f64,
    pub variance: f64,
    pub elapsed_secs: f64,
    pub trials: usize,
    pub sample_std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub samples: &'a [LeafSample],
}

impl<'a> DepthLine<'a> {
    pub fn from_report(report: &'a DepthReport) -> Self {
        Self {
            n: report.depth,
            mean: report.statistics.mean,
            variance: report.statistics.variance,
            elapsed_secs: report.elapsed_secs,
            trials: report.summary.n,
            sample_std_dev: report.summary.sample_std_dev,
            ci_lower: report.summary.ci_lower,
            ci_upper: report.summary.ci_upper,
            min: report.summary.min,
            max: report.summary.max,
            samples: &report.samples,
        }
    }
}

pub fn json_line(report: &DepthReport) -> serde_json::Result<String> {
    serde_json::to_string(&DepthLine::from_report(report))
}
