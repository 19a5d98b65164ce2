use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IntegrationFailure};

/// Integration interval with the exact instants at which the phase is reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    points: Vec<f64>,
}

impl TimeSpan {
    /// `count` evenly spaced points from `start` to `end` inclusive
    pub fn linspace(start: f64, end: f64, count: usize) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::TimeSpan(format!(
                "need at least 2 evaluation points, got {count}"
            )));
        }
        let step = (end - start) / (count - 1) as f64;
        let mut points: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
        // Pin the endpoint so rounding never leaves the last sample short of `end`
        points[count - 1] = end;
        Self::from_points(points)
    }

    /// Use caller-provided evaluation points
    pub fn from_points(points: Vec<f64>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::TimeSpan(format!(
                "need at least 2 evaluation points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|t| !t.is_finite()) {
            return Err(ConfigError::TimeSpan(format!(
                "evaluation point {bad} is not finite"
            )));
        }
        if let Some(i) = points.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConfigError::TimeSpan(format!(
                "evaluation points must be strictly increasing (index {} -> {})",
                i,
                i + 1
            )));
        }
        Ok(Self { points })
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Work done by one integration call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStats {
    pub rhs_evaluations: usize,
}

/// Sampled phase θ(t) at the evaluation points of a `TimeSpan`.
///
/// When `converged` is false the samples stop before the failure and must
/// not be summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub phase: Vec<f64>,
    pub converged: bool,
    pub failure: Option<IntegrationFailure>,
    pub stats: IntegrationStats,
}

impl Trajectory {
    /// A converged trajectory built from known samples
    pub fn new(times: Vec<f64>, phase: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), phase.len());
        Self {
            times,
            phase,
            converged: true,
            failure: None,
            stats: IntegrationStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate over (t, θ) samples
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.phase.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let span = TimeSpan::linspace(0.0, 50.0, 2000).unwrap();
        assert_eq!(span.len(), 2000);
        assert_eq!(span.start(), 0.0);
        assert_eq!(span.end(), 50.0);
    }

    #[test]
    fn test_linspace_rejects_single_point() {
        assert!(matches!(
            TimeSpan::linspace(0.0, 1.0, 1),
            Err(ConfigError::TimeSpan(_))
        ));
    }

    #[test]
    fn test_from_points_rejects_non_increasing() {
        let result = TimeSpan::from_points(vec![0.0, 1.0, 1.0, 2.0]);
        assert!(matches!(result, Err(ConfigError::TimeSpan(_))));
    }

    #[test]
    fn test_reversed_span_rejected() {
        assert!(TimeSpan::linspace(10.0, 0.0, 5).is_err());
    }
}
