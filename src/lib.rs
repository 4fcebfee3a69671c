//! Spanwise lift distributions of symmetric lifting surfaces
//! with the NASA-Blackwell vortex lattice method (NASA TN D-5335).
//!
//! One half of the surface is described by a [`PlanformGeometry`]
//! and discretized into a single spanwise row of horseshoe vortices,
//! mirrored across the root to model the other half.
//! Flow tangency at the panels' three-quarter-chord control points
//! gives a dense linear system for the circulation,
//! from which the overall lift coefficient and the spanwise
//! load distributions follow.
//!
//! The usual entry point is [`Solver`], which discretizes the planform
//! and assembles the influence matrices once and can then be solved
//! at any number of angles of attack:
//! ```
//! use blackwell::{LatticeConfig, PlanformGeometry, Solver};
//!
//! let wing = PlanformGeometry::trapezoidal(6., 2., 1., 15f64.to_radians())?;
//! let config = LatticeConfig {
//!     mach: 0.3,
//!     ..Default::default()
//! };
//! let solver = Solver::new(wing, config)?;
//! let (solution, induced) = solver.vertical_velocity(4f64.to_radians())?;
//! println!("CL = {:.3}", solution.cl_overall);
//! assert_eq!(induced.induced_angle.len(), solver.panel_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//! For a single solve, the free function [`solve`] does all of this in one call.
//! Lift curves over many angles are computed in parallel by [`sweep::lift_curve`].

#![warn(missing_docs)]

pub mod atmosphere;

pub mod interpolate;

pub mod geometry;
#[doc(inline)]
pub use geometry::{GeometryError, PlanformGeometry};

pub mod lattice;
#[doc(inline)]
pub use lattice::{Lattice, LatticeConfig, Panel, ShapePolicy};

pub mod kernel;

pub mod influence;

pub mod distribution;
#[doc(inline)]
pub use distribution::{Solution, SpanwiseLoading};

pub mod downwash;
#[doc(inline)]
pub use downwash::InducedVelocity;

pub mod solver;
#[doc(inline)]
pub use solver::{solve, Error, SolveError, Solver};

pub mod sweep;
#[doc(inline)]
pub use sweep::{LiftCurve, LiftSlope};

// nalgebra re-exports of common types for convenience

pub use nalgebra as na;
/// Type alias for a 3D `nalgebra` vector.
pub type Vec3 = na::Vector3<f64>;
