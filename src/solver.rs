//! The lifting-surface solver tying discretization, assembly and post-processing together.

use nalgebra::DMatrix;

use crate::{
    atmosphere, influence, interpolate, GeometryError, InducedVelocity, Lattice, LatticeConfig,
    Panel, PlanformGeometry, Solution,
};

/// Failure to solve for the circulation distribution.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SolveError {
    /// The influence matrix is singular or too badly conditioned to solve,
    /// typically because two panels coincide.
    #[error("Influence matrix is singular")]
    SingularMatrix,
    /// The solved circulation contains NaN or infinite values.
    #[error("Solved circulation is not finite")]
    NonFinite,
    /// An angle of attack can't be used to fit a lift-curve slope.
    #[error("Invalid angle of attack {0} for a lift slope")]
    InvalidAngle(f64),
}

/// Any failure of the one-shot [`solve`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The geometry or configuration couldn't be discretized.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// The discretized system couldn't be solved.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// A discretized lifting surface ready to be solved at any angle of attack.
///
/// Everything that doesn't depend on the angle of attack,
/// including both influence matrices, is computed once on construction.
/// The solver is immutable afterwards,
/// so it can be shared between threads to solve many angles concurrently
/// (see [`lift_curve`][crate::sweep::lift_curve]).
///
/// ```
/// # use blackwell::{LatticeConfig, PlanformGeometry, Solver};
/// let wing = PlanformGeometry::trapezoidal(4., 1., 1., 0.)?;
/// let solver = Solver::new(wing, LatticeConfig::default())?;
/// let solution = solver.solve(5f64.to_radians())?;
/// assert!(solution.cl_overall > 0.);
/// assert_eq!(solution.loading.cl.last(), Some(&0.));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    geometry: PlanformGeometry,
    config: LatticeConfig,
    lattice: Lattice,
    influence: DMatrix<f64>,
    downwash: DMatrix<f64>,
    true_airspeed: f64,
    output_stations: Vec<f64>,
}

impl Solver {
    /// Discretize a planform and assemble its influence matrices.
    pub fn new(geometry: PlanformGeometry, config: LatticeConfig) -> Result<Self, GeometryError> {
        let lattice = Lattice::discretize(&geometry, &config)?;
        Ok(Self::from_lattice(geometry, config, lattice))
    }

    /// Build a solver on an existing lattice.
    ///
    /// The lattice is used as is, so the config only contributes
    /// the flight condition (Mach number and altitude).
    pub fn from_lattice(geometry: PlanformGeometry, config: LatticeConfig, lattice: Lattice) -> Self {
        let influence = influence::assemble(&lattice);
        let downwash = influence::downwash_matrix(&lattice);
        let true_airspeed = atmosphere::true_airspeed(config.mach, config.altitude);
        let output_stations = interpolate::linspace(0., lattice.semispan(), lattice.len());

        log::debug!(
            "assembled {n}x{n} influence matrix, true airspeed {true_airspeed:.2} m/s",
            n = lattice.len()
        );

        Self {
            geometry,
            config,
            lattice,
            influence,
            downwash,
            true_airspeed,
            output_stations,
        }
    }

    /// Solve for the circulation and load distributions at a root angle of attack.
    ///
    /// Each call is independent of any previous ones.
    pub fn solve(&self, alpha: f64) -> Result<Solution, SolveError> {
        let alpha_dist = self.lattice.alpha_distribution(alpha);
        let gamma = influence::solve_circulation(&self.influence, &alpha_dist)?;

        // the tip carries no circulation
        let gamma_signed: Vec<f64> = gamma.iter().copied().chain(std::iter::once(0.)).collect();

        let solution = Solution::new(
            &self.geometry,
            &self.lattice,
            alpha,
            gamma_signed,
            self.true_airspeed,
            &self.output_stations,
        );
        log::debug!("alpha {alpha:.4} rad: CL = {:.5}", solution.cl_overall);
        Ok(solution)
    }

    /// Solve at a root angle of attack and evaluate the induced flow
    /// at the control points from the solved circulation.
    pub fn vertical_velocity(&self, alpha: f64) -> Result<(Solution, InducedVelocity), SolveError> {
        let solution = self.solve(alpha)?;
        let induced = InducedVelocity::evaluate(
            &self.lattice,
            &self.downwash,
            &solution.gamma_signed,
            self.true_airspeed,
        );
        Ok((solution, induced))
    }

    /// The planform being solved.
    #[inline]
    pub fn geometry(&self) -> &PlanformGeometry {
        &self.geometry
    }

    /// The configuration the solver was built with.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// The discretized lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The lattice panels from root to tip.
    #[inline]
    pub fn panels(&self) -> &[Panel] {
        self.lattice.panels()
    }

    /// Number of lattice panels.
    #[inline]
    pub fn panel_count(&self) -> usize {
        self.lattice.len()
    }

    /// The full influence matrix including sidewash terms of dihedral panels.
    #[inline]
    pub fn influence_matrix(&self) -> &DMatrix<f64> {
        &self.influence
    }

    /// The matrix of downwash alone, used for the induced velocity.
    #[inline]
    pub fn downwash_matrix(&self) -> &DMatrix<f64> {
        &self.downwash
    }

    /// Span stations of [`Solution::loading`].
    #[inline]
    pub fn output_stations(&self) -> &[f64] {
        &self.output_stations
    }

    /// True airspeed of the flight condition in m/s.
    #[inline]
    pub fn true_airspeed(&self) -> f64 {
        self.true_airspeed
    }
}

/// Discretize, assemble and solve in one go.
///
/// Prefer building a [`Solver`] when solving the same planform
/// at more than one angle of attack.
pub fn solve(
    geometry: &PlanformGeometry,
    config: &LatticeConfig,
    alpha: f64,
) -> Result<Solution, Error> {
    let solver = Solver::new(geometry.clone(), *config)?;
    Ok(solver.solve(alpha)?)
}
