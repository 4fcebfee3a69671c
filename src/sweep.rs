//! Lift as a function of the angle of attack.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{SolveError, Solver};

/// Overall lift coefficient at a list of angles of attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiftCurve {
    /// Root angles of attack in radians.
    pub alphas: Vec<f64>,
    /// Overall lift coefficient at each angle.
    pub cl: Vec<f64>,
}

impl LiftCurve {
    /// Iterate over `(alpha, CL)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.alphas.iter().copied().zip(self.cl.iter().copied())
    }
}

/// Solve at every angle in `alphas`, in parallel.
///
/// Fails with the first error encountered if any of the solves fail.
pub fn lift_curve(solver: &Solver, alphas: &[f64]) -> Result<LiftCurve, SolveError> {
    let cl = alphas
        .par_iter()
        .map(|&alpha| solver.solve(alpha).map(|s| s.cl_overall))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LiftCurve {
        alphas: alphas.to_vec(),
        cl,
    })
}

/// Linear part of the lift curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiftSlope {
    /// Lift-curve slope per radian.
    pub cl_alpha: f64,
    /// Lift coefficient at zero root angle of attack.
    pub cl0: f64,
    /// Root angle of attack giving zero lift, `-CL0 / CLα`.
    pub alpha_zero_lift: f64,
}

impl LiftSlope {
    /// Lift coefficient predicted by the linear model.
    #[inline]
    pub fn cl_at(&self, alpha: f64) -> f64 {
        self.cl0 + self.cl_alpha * alpha
    }
}

/// Slope of the lift curve from solves at zero and at `alpha_star`.
///
/// The lattice model is linear in the angle of attack,
/// so two points determine the whole curve.
///
/// Fails with [`SolveError::InvalidAngle`] unless `alpha_star`
/// is a normal (finite, nonzero, non-subnormal) number.
pub fn lift_slope(solver: &Solver, alpha_star: f64) -> Result<LiftSlope, SolveError> {
    if !alpha_star.is_normal() {
        return Err(SolveError::InvalidAngle(alpha_star));
    }

    let (cl0, cl_star) = rayon::join(|| solver.solve(0.), || solver.solve(alpha_star));
    let cl0 = cl0?.cl_overall;
    let cl_alpha = (cl_star?.cl_overall - cl0) / alpha_star;
    Ok(LiftSlope {
        cl_alpha,
        cl0,
        alpha_zero_lift: -cl0 / cl_alpha,
    })
}
