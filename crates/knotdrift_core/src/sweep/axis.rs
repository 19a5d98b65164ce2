use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::SweepTarget;

/// Point spacing along an axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSpacing {
    #[default]
    Linear,
    /// Evenly spaced in log10, like `logspace(log10(min), log10(max), count)`
    Log,
}

/// Range description an axis is generated from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub count: usize,
    #[serde(default)]
    pub spacing: AxisSpacing,
}

impl AxisSpec {
    pub fn linear(min: f64, max: f64, count: usize) -> Self {
        Self {
            min,
            max,
            count,
            spacing: AxisSpacing::Linear,
        }
    }

    pub fn log(min: f64, max: f64, count: usize) -> Self {
        Self {
            min,
            max,
            count,
            spacing: AxisSpacing::Log,
        }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidRange {
            name,
            min: self.min,
            max: self.max,
            reason,
        };
        if self.count == 0 {
            return Err(invalid("count must be positive"));
        }
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(invalid("bounds must be finite"));
        }
        if self.min > self.max {
            return Err(invalid("min exceeds max"));
        }
        if self.spacing == AxisSpacing::Log && self.min <= 0.0 {
            return Err(invalid("log spacing needs positive bounds"));
        }
        Ok(())
    }

    /// Deterministic axis values. A single-point axis holds just `min`.
    pub fn values(&self) -> Vec<f64> {
        let (lo, hi) = match self.spacing {
            AxisSpacing::Linear => (self.min, self.max),
            AxisSpacing::Log => (self.min.log10(), self.max.log10()),
        };
        let raw: Vec<f64> = if self.count <= 1 {
            vec![lo]
        } else {
            let step = (hi - lo) / (self.count - 1) as f64;
            (0..self.count).map(|i| lo + step * i as f64).collect()
        };
        match self.spacing {
            AxisSpacing::Linear => raw,
            AxisSpacing::Log => raw.into_iter().map(|e| 10f64.powf(e)).collect(),
        }
    }

    /// Validate and materialize the axis for `target`
    pub fn generate(&self, target: SweepTarget) -> Result<ParameterAxis, ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyAxis(target));
        }
        self.validate(target.key())?;
        Ok(ParameterAxis {
            target,
            spacing: self.spacing,
            values: self.values(),
        })
    }
}

/// One named sweep dimension; read-only once generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAxis {
    target: SweepTarget,
    spacing: AxisSpacing,
    values: Vec<f64>,
}

impl ParameterAxis {
    /// Axis over explicit values; checked when the sweep starts
    pub fn from_values(target: SweepTarget, values: Vec<f64>) -> Self {
        Self {
            target,
            spacing: AxisSpacing::Linear,
            values,
        }
    }

    pub fn target(&self) -> SweepTarget {
        self.target
    }

    pub fn spacing(&self) -> AxisSpacing {
        self.spacing
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn label(&self) -> &'static str {
        self.target.label()
    }

    /// Median of the axis values (mean of the middle pair for even lengths)
    pub fn median(&self) -> Option<f64> {
        median(&self.values)
    }
}

/// Median of a slice, ignoring order; `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_values() {
        let values = AxisSpec::linear(0.2, 1.5, 14).values();
        assert_eq!(values.len(), 14);
        assert!((values[0] - 0.2).abs() < 1e-15);
        assert!((values[1] - 0.3).abs() < 1e-12);
        assert!((values[13] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_log_values() {
        let values = AxisSpec::log(1e8, 5e9, 16).values();
        assert_eq!(values.len(), 16);
        assert!((values[0] / 1e8 - 1.0).abs() < 1e-12);
        assert!((values[15] / 5e9 - 1.0).abs() < 1e-12);
        let ratio = values[1] / values[0];
        for pair in values.windows(2) {
            assert!((pair[1] / pair[0] - ratio).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point_axis() {
        assert_eq!(AxisSpec::linear(0.7, 2.0, 1).values(), vec![0.7]);
    }

    #[test]
    fn test_zero_count_is_empty_axis() {
        let result = AxisSpec::linear(0.1, 1.8, 0).generate(SweepTarget::Coupling);
        assert_eq!(result, Err(ConfigError::EmptyAxis(SweepTarget::Coupling)));
    }

    #[test]
    fn test_log_rejects_non_positive() {
        let result = AxisSpec::log(0.0, 5e9, 4).generate(SweepTarget::BaseFrequency);
        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(AxisSpec::linear(2.0, 1.0, 4).validate("coupling").is_err());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}
