//! Trefoil geometry and linking-number phase bookkeeping.
//!
//! These helpers feed illustrations only; nothing here touches the sweep
//! engine.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Phase picked up per braid crossing (rad)
pub const PHASE_PER_CROSSING: f64 = 4.0 * PI / 5.0;

/// Crossings of the trefoil diagram
pub const TREFOIL_CROSSINGS: f64 = 3.0;

/// Sampled closed curve in three dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrefoilCurve {
    pub phase_shift: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl TrefoilCurve {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<[f64; 3]> {
        Some([*self.x.get(i)?, *self.y.get(i)?, *self.z.get(i)?])
    }
}

/// Standard trefoil embedding at a single parameter value
pub fn trefoil_point(t: f64, scale: f64) -> [f64; 3] {
    [
        scale * (t.sin() + 2.0 * (2.0 * t).sin()),
        scale * (t.cos() - 2.0 * (2.0 * t).cos()),
        scale * -(3.0 * t).sin(),
    ]
}

/// Trefoil sampled at `params`, each shifted by `phase_shift`
pub fn trefoil_curve(params: &[f64], scale: f64, phase_shift: f64) -> TrefoilCurve {
    let mut curve = TrefoilCurve {
        phase_shift,
        x: Vec::with_capacity(params.len()),
        y: Vec::with_capacity(params.len()),
        z: Vec::with_capacity(params.len()),
    };
    for &t in params {
        let [x, y, z] = trefoil_point(t + phase_shift, scale);
        curve.x.push(x);
        curve.y.push(y);
        curve.z.push(z);
    }
    curve
}

/// `n` evenly spaced curve parameters over three full turns, [0, 6π]
pub fn curve_parameters(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let end = 3.0 * TAU;
            let step = end / (n - 1) as f64;
            (0..n).map(|i| step * i as f64).collect()
        }
    }
}

/// `strands` copies of the trefoil spaced 2π/strands apart (C_n symmetric braid)
pub fn braid_paths(strands: usize, points: usize, scale: f64) -> Vec<TrefoilCurve> {
    let params = curve_parameters(points);
    (0..strands)
        .map(|i| trefoil_curve(&params, scale, i as f64 * TAU / strands as f64))
        .collect()
}

/// Phase accounting for one linking number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkingPhase {
    pub linking_number: f64,
    pub crossings: f64,
    pub total_phase: f64,
    /// Total phase folded into [0, 2π)
    pub residue: f64,
    pub sin_residue: f64,
    /// Chiral asymmetry sin²(residue)
    pub sin2_residue: f64,
}

impl LinkingPhase {
    pub fn new(linking_number: f64, phase_per_crossing: f64) -> Self {
        let crossings = linking_number / TREFOIL_CROSSINGS;
        let total_phase = crossings * phase_per_crossing;
        let residue = total_phase.rem_euclid(TAU);
        let sin_residue = residue.sin();
        Self {
            linking_number,
            crossings,
            total_phase,
            residue,
            sin_residue,
            sin2_residue: sin_residue * sin_residue,
        }
    }
}

/// One row per linking number
pub fn linking_phase_table(linking_numbers: &[f64], phase_per_crossing: f64) -> Vec<LinkingPhase> {
    linking_numbers
        .iter()
        .map(|&lk| LinkingPhase::new(lk, phase_per_crossing))
        .collect()
}

/// Multiples of three from 0 to `max` inclusive
pub fn trefoil_linking_numbers(max: u32) -> Vec<f64> {
    (0..=max).step_by(3).map(f64::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trefoil_origin_point() {
        let [x, y, z] = trefoil_point(0.0, 3.0);
        assert!(x.abs() < 1e-12);
        assert!((y - (-3.0)).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_curve_is_closed() {
        let params = curve_parameters(1200);
        let curve = trefoil_curve(&params, 3.0, 0.0);
        let first = curve.point(0).unwrap();
        let last = curve.point(curve.len() - 1).unwrap();
        for (a, b) in first.iter().zip(last) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_braid_paths_shifted() {
        let paths = braid_paths(3, 50, 3.0);
        assert_eq!(paths.len(), 3);
        assert!((paths[1].phase_shift - TAU / 3.0).abs() < 1e-15);
        let expected = trefoil_point(TAU / 3.0, 3.0);
        let got = paths[1].point(0).unwrap();
        for (a, b) in expected.iter().zip(got) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_linking_six_is_two_crossing_cycles() {
        let row = LinkingPhase::new(6.0, PHASE_PER_CROSSING);
        assert_eq!(row.crossings, 2.0);
        assert!((row.total_phase - 8.0 * PI / 5.0).abs() < 1e-12);
        assert!((row.residue - 8.0 * PI / 5.0).abs() < 1e-12);
        assert!((row.sin2_residue - (8.0 * PI / 5.0).sin().powi(2)).abs() < 1e-12);
    }

    #[test]
    fn test_residue_wraps() {
        let row = LinkingPhase::new(9.0, PHASE_PER_CROSSING);
        // 3 · 4π/5 = 12π/5 ≡ 2π/5
        assert!((row.residue - 2.0 * PI / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_linking_numbers() {
        assert_eq!(
            trefoil_linking_numbers(18),
            vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0]
        );
    }
}
