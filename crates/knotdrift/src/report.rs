//! JSON result documents written by the CLI
//!
//! Grids stay in rad/time. The Grad/s figures in the summaries are a
//! presentation convenience only.

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use jiff::Timestamp;
use knotdrift_core::model::IntegrationStats;
use knotdrift_core::sweep::{SweepGrid, SweepSummary};
use knotdrift_core::{DriftSweep, ParameterSet, PhaseSummary, RunConfig};
use serde::{Deserialize, Serialize};

/// rad/s → Grad/s
pub const GIGA: f64 = 1e-9;

/// Output of `knotdrift sweep`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub generated_at: Timestamp,
    pub config: RunConfig,
    pub sweeps: Vec<SweepEntry>,
}

/// One plan's result with its headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub labels: Vec<String>,
    pub summary: SweepSummary,
    /// Drift in Grad/s, `null` where undefined
    pub drift_grad_per_s: SweepGrid<Option<f64>>,
    pub sweep: DriftSweep,
}

impl SweepEntry {
    pub fn new(sweep: DriftSweep) -> Self {
        Self {
            labels: sweep.labels().into_iter().map(String::from).collect(),
            summary: sweep.summary(),
            drift_grad_per_s: sweep.scaled(GIGA),
            sweep,
        }
    }

    /// Log the extrema the way a reader wants them: in Grad/s
    pub fn log_maxima(&self) {
        let name = &self.sweep.name;
        if let Some(max) = &self.summary.max_drift {
            tracing::info!(
                sweep = %name,
                indices = ?max.indices,
                coupling = max.parameters.coupling,
                base_frequency = max.parameters.base_frequency,
                modulation_scale = max.parameters.modulation_scale,
                "Max drift {:.6} Grad/s",
                max.value * GIGA
            );
        }
        if let Some(max) = &self.summary.max_excess {
            tracing::info!(
                sweep = %name,
                indices = ?max.indices,
                coupling = max.parameters.coupling,
                modulation_scale = max.parameters.modulation_scale,
                "Max |drift - ω| {:.6e} Grad/s",
                max.value * GIGA
            );
        }
        if self.summary.undefined > 0 {
            tracing::warn!(
                sweep = %name,
                undefined = self.summary.undefined,
                points = self.summary.points,
                "Sweep has undefined points"
            );
        }
    }
}

impl SweepReport {
    pub fn new(config: RunConfig, sweeps: Vec<DriftSweep>) -> Self {
        Self {
            generated_at: Timestamp::now(),
            config,
            sweeps: sweeps.into_iter().map(SweepEntry::new).collect(),
        }
    }
}

/// Output of `knotdrift point`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    pub generated_at: Timestamp,
    pub parameters: ParameterSet,
    pub summary: PhaseSummary,
    pub drift_grad_per_s: f64,
    pub stats: IntegrationStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<(f64, f64)>>,
}

/// Pretty JSON to `path`, or to stdout when no path is given
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).wrap_err("Failed to serialize report")?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).wrap_err_with(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            fs::write(path, json)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
