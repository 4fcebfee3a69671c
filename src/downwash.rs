//! Induced vertical velocity and induced angle of attack at the control points.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::Lattice;

/// Flow induced by the trailing vortex system at each control point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InducedVelocity {
    /// Induced vertical velocity in m/s.
    pub vertical_velocity: Vec<f64>,
    /// Induced angle of attack `atan(w / V)` in radians.
    pub induced_angle: Vec<f64>,
    /// Span stations of the control points.
    pub control_stations: Vec<f64>,
}

impl InducedVelocity {
    /// Evaluate the induced flow from a solved circulation.
    ///
    /// `gamma_signed` is the nondimensional circulation of each panel,
    /// optionally followed by the tip zero, which is ignored.
    /// At zero airspeed the vertical velocity vanishes
    /// and the induced angle is the limit of `atan(w / V)` as `V` goes to zero.
    pub fn evaluate(
        lattice: &Lattice,
        downwash_matrix: &DMatrix<f64>,
        gamma_signed: &[f64],
        true_airspeed: f64,
    ) -> Self {
        let n = lattice.len();
        let gamma = DVector::from_column_slice(&gamma_signed[..n]);
        let gamma_dim = &gamma * (4. * PI * true_airspeed);
        let w = downwash_matrix * gamma_dim / (4. * PI);

        let induced_angle: Vec<f64> = if true_airspeed > 0. {
            w.iter().map(|w| f64::atan(w / true_airspeed)).collect()
        } else {
            (downwash_matrix * gamma).iter().map(|x| x.atan()).collect()
        };

        Self {
            vertical_velocity: w.iter().copied().collect(),
            induced_angle,
            control_stations: lattice.panels().iter().map(|p| p.control_point.y).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{influence, LatticeConfig, PlanformGeometry};
    use approx::assert_relative_eq;
    use itertools::izip;

    #[test]
    fn angle_is_independent_of_airspeed() {
        let wing = PlanformGeometry::trapezoidal(3., 1., 0.5, 0.2).unwrap();
        let lattice = Lattice::discretize(&wing, &LatticeConfig::with_panels(6)).unwrap();
        let d = influence::downwash_matrix(&lattice);
        let gamma = [0.02, 0.019, 0.017, 0.014, 0.01, 0.005, 0.];

        let still = InducedVelocity::evaluate(&lattice, &d, &gamma, 0.);
        let moving = InducedVelocity::evaluate(&lattice, &d, &gamma, 120.);

        assert!(still.vertical_velocity.iter().all(|&w| w == 0.));
        for (a0, a1, w) in izip!(&still.induced_angle, &moving.induced_angle, &moving.vertical_velocity) {
            assert_relative_eq!(a0, a1, max_relative = 1e-12);
            assert_relative_eq!(w.atan2(120.), *a1, max_relative = 1e-12);
        }
        assert_eq!(moving.control_stations.len(), 6);
        assert_eq!(moving.control_stations[0], lattice.panels()[0].station);
    }
}
