//! Adaptive RK5(4) integration with dense output.
//!
//! The phase ODE is handed to the Tsitouras 5(4) pair of `numeris::ode`,
//! which picks its own steps under a mixed absolute/relative error test.
//! The phase at the caller's evaluation points comes from the solver's
//! continuous extension, so the sampling grid never constrains the step size.
//!
//! Every right-hand-side call goes through an `RhsMonitor` that enforces the
//! step budget and catches non-finite derivatives, so a failed run is
//! classified by what the model did rather than by how the solver reacted.

use std::cell::Cell;

use numeris::Vector;
use numeris::ode::{AdaptiveSettings, RKAdaptive, RKTS54};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IntegrationFailure};
use crate::model::{IntegrationStats, ParameterSet, PhaseModel, TimeSpan, Trajectory};

/// Right-hand-side evaluations per step of the 5(4) pair (seven stages, FSAL)
const EVALUATIONS_PER_STEP: usize = 6;

fn default_rtol() -> f64 {
    1e-8
}

fn default_atol() -> f64 {
    1e-10
}

fn default_max_steps() -> usize {
    1_000_000
}

/// Tolerances and limits for one integration call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorSettings {
    /// Relative tolerance
    #[serde(default = "default_rtol")]
    pub rtol: f64,
    /// Absolute tolerance
    #[serde(default = "default_atol")]
    pub atol: f64,
    /// Step budget; each step is charged six right-hand-side evaluations
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            rtol: default_rtol(),
            atol: default_atol(),
            max_steps: default_max_steps(),
        }
    }
}

impl IntegratorSettings {
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [("rtol", self.rtol), ("atol", self.atol)];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "tolerance must be positive",
                });
            }
        }
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_steps",
                value: 0.0,
                reason: "must allow at least one step",
            });
        }
        Ok(())
    }

    fn evaluation_budget(&self) -> usize {
        self.max_steps.saturating_mul(EVALUATIONS_PER_STEP)
    }
}

/// Integrate θ from θ(start) = 0 over `span`
pub fn integrate<M: PhaseModel>(
    model: &M,
    params: &ParameterSet,
    span: &TimeSpan,
    settings: &IntegratorSettings,
) -> Trajectory {
    integrate_from(model, params, span, settings, 0.0)
}

/// Integrate θ from θ(start) = `initial_phase` over `span`.
///
/// Never panics on solver trouble: a failed run comes back with
/// `converged == false` and the reason in `failure`. The solver only hands
/// back its continuous extension once it reaches the end of the span, so a
/// failed run holds nothing past the initial sample.
pub fn integrate_from<M: PhaseModel>(
    model: &M,
    params: &ParameterSet,
    span: &TimeSpan,
    settings: &IntegratorSettings,
    initial_phase: f64,
) -> Trajectory {
    let monitor = RhsMonitor::new(model, params, settings.evaluation_budget());
    let mut times = Vec::with_capacity(span.len());
    let mut phase = Vec::with_capacity(span.len());
    times.push(span.start());
    phase.push(initial_phase);

    monitor.velocity(span.start(), initial_phase);
    if let Some(failure) = monitor.failure() {
        return monitor.finish(times, phase, Some(failure));
    }

    let solver_settings = AdaptiveSettings {
        abs_tol: settings.atol,
        rel_tol: settings.rtol,
        dense_output: true,
        ..AdaptiveSettings::default()
    };
    let y0 = Vector::from_array([initial_phase]);
    let solved = RKTS54::integrate(
        span.start(),
        span.end(),
        &y0,
        |t, y| Vector::from_array([monitor.velocity(t, y[0])]),
        &solver_settings,
    );

    let solution = match (monitor.failure(), solved) {
        (Some(failure), _) => return monitor.finish(times, phase, Some(failure)),
        (None, Err(err)) => {
            tracing::debug!(error = ?err, "solver stopped early");
            let failure = IntegrationFailure::StepUnderflow {
                time: monitor.furthest_time(),
            };
            return monitor.finish(times, phase, Some(failure));
        }
        (None, Ok(solution)) => solution,
    };

    for &t in &span.points()[1..] {
        match RKTS54::interpolate(t, &solution) {
            Ok(y) => {
                times.push(t);
                phase.push(y[0]);
            }
            Err(err) => {
                tracing::debug!(error = ?err, time = t, "dense output unavailable");
                let failure = IntegrationFailure::DenseOutput { time: t };
                return monitor.finish(times, phase, Some(failure));
            }
        }
    }

    monitor.finish(times, phase, None)
}

/// Gatekeeper around the model's right-hand side.
///
/// Once tripped it answers NaN to every further call so the solver stops
/// accepting steps, and remembers the first reason it tripped.
struct RhsMonitor<'a, M> {
    model: &'a M,
    params: &'a ParameterSet,
    budget: usize,
    evaluations: Cell<usize>,
    furthest: Cell<f64>,
    failure: Cell<Option<IntegrationFailure>>,
}

impl<'a, M: PhaseModel> RhsMonitor<'a, M> {
    fn new(model: &'a M, params: &'a ParameterSet, budget: usize) -> Self {
        Self {
            model,
            params,
            budget,
            evaluations: Cell::new(0),
            furthest: Cell::new(f64::NEG_INFINITY),
            failure: Cell::new(None),
        }
    }

    fn velocity(&self, time: f64, phase: f64) -> f64 {
        if self.failure.get().is_some() {
            return f64::NAN;
        }
        if self.evaluations.get() >= self.budget {
            self.failure.set(Some(IntegrationFailure::StepBudgetExhausted {
                time: self.furthest.get(),
                steps: self.evaluations.get() / EVALUATIONS_PER_STEP,
            }));
            return f64::NAN;
        }
        self.evaluations.set(self.evaluations.get() + 1);

        let rate = self.model.velocity(time, phase, self.params);
        if !(rate.is_finite() && phase.is_finite()) {
            self.failure
                .set(Some(IntegrationFailure::NonFiniteDerivative { time }));
            return f64::NAN;
        }
        if time > self.furthest.get() {
            self.furthest.set(time);
        }
        rate
    }

    fn failure(&self) -> Option<IntegrationFailure> {
        self.failure.get()
    }

    fn furthest_time(&self) -> f64 {
        self.furthest.get()
    }

    fn finish(
        &self,
        times: Vec<f64>,
        phase: Vec<f64>,
        failure: Option<IntegrationFailure>,
    ) -> Trajectory {
        if let Some(failure) = &failure {
            tracing::debug!(%failure, samples = times.len(), "integration failed");
        }
        Trajectory {
            times,
            phase,
            converged: failure.is_none(),
            failure,
            stats: IntegrationStats {
                rhs_evaluations: self.evaluations.get(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unit;

    impl PhaseModel for Unit {
        fn velocity(&self, _time: f64, _phase: f64, _params: &ParameterSet) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_settings_reject_zero_tolerance() {
        let settings = IntegratorSettings::with_tolerances(0.0, 1e-10);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_reject_zero_budget() {
        let settings = IntegratorSettings {
            max_steps: 0,
            ..IntegratorSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_monitor_trips_on_budget() {
        let params = ParameterSet::default();
        let monitor = RhsMonitor::new(&Unit, &params, 2);
        assert_eq!(monitor.velocity(0.0, 0.0), 1.0);
        assert_eq!(monitor.velocity(0.5, 0.5), 1.0);
        assert!(monitor.velocity(1.0, 1.0).is_nan());
        assert!(matches!(
            monitor.failure(),
            Some(IntegrationFailure::StepBudgetExhausted { time, .. }) if time == 0.5
        ));
        // Stays tripped
        assert!(monitor.velocity(0.1, 0.0).is_nan());
    }

    #[test]
    fn test_monitor_rejects_non_finite_phase() {
        let params = ParameterSet::default();
        let monitor = RhsMonitor::new(&Unit, &params, 10);
        assert!(monitor.velocity(2.0, f64::INFINITY).is_nan());
        assert_eq!(
            monitor.failure(),
            Some(IntegrationFailure::NonFiniteDerivative { time: 2.0 })
        );
    }
}
