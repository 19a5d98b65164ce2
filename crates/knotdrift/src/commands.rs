//! Subcommand implementations.
//!
//! Each returns the document it produced so the caller decides where it goes.

use color_eyre::eyre::{WrapErr, eyre};
use jiff::Timestamp;
use knotdrift_core::knot::{self, LinkingPhase, TrefoilCurve};
use knotdrift_core::{PhaseSummary, RunConfig, integrate, sweep};

use crate::loader;
use crate::report::{GIGA, PointReport, SweepEntry, SweepReport};

/// Run every plan of `config` in order
pub fn run_sweeps(config: RunConfig) -> color_eyre::Result<SweepReport> {
    let requests = config.requests().wrap_err("Invalid run configuration")?;
    let drive = config.drive();

    let mut report = SweepReport::new(config, Vec::new());
    for request in &requests {
        let result = sweep(&drive, request)
            .wrap_err_with(|| format!("Sweep '{}' rejected", request.name))?;
        let entry = SweepEntry::new(result);
        entry.log_maxima();
        report.sweeps.push(entry);
    }
    Ok(report)
}

/// Integrate the configuration's fixed parameter set once
pub fn run_point(config: &RunConfig, keep_samples: bool) -> color_eyre::Result<PointReport> {
    config.validate().wrap_err("Invalid run configuration")?;
    let params = config.fixed_parameters();
    let span = config.time_grid()?;

    let trajectory = integrate(&config.drive(), &params, &span, &config.tolerances);
    tracing::info!(
        rhs_evaluations = trajectory.stats.rhs_evaluations,
        converged = trajectory.converged,
        "Integration finished"
    );

    let summary = PhaseSummary::from_trajectory(&trajectory, config.tail_window)
        .wrap_err("No drift for the fixed parameters")?;
    tracing::info!(
        final_phase_mod_2pi = summary.final_phase_mod_2pi,
        "Drift {:.9} Grad/s",
        summary.drift * GIGA
    );

    Ok(PointReport {
        generated_at: Timestamp::now(),
        parameters: params,
        summary,
        drift_grad_per_s: summary.drift * GIGA,
        stats: trajectory.stats,
        samples: keep_samples.then(|| trajectory.samples().collect()),
    })
}

pub fn trefoil(strands: usize, points: usize, scale: f64) -> color_eyre::Result<Vec<TrefoilCurve>> {
    if strands == 0 || points < 2 {
        return Err(eyre!("need at least one strand and two points"));
    }
    Ok(knot::braid_paths(strands, points, scale))
}

pub fn linking(max_lk: u32) -> Vec<LinkingPhase> {
    let rows = knot::linking_phase_table(
        &knot::trefoil_linking_numbers(max_lk),
        knot::PHASE_PER_CROSSING,
    );
    for row in &rows {
        tracing::debug!(
            linking_number = row.linking_number,
            residue = row.residue,
            sin2 = row.sin2_residue,
            "Linking phase"
        );
    }
    rows
}

/// A preset rendered as YAML
pub fn init_config(preset: &str) -> color_eyre::Result<String> {
    let config = loader::preset(preset)?;
    loader::to_yaml(&config).wrap_err("Failed to render configuration")
}
