//! Planform description of a symmetric lifting surface.
//!
//! Only one half of the surface is described;
//! the other half is its mirror image across the root plane.

use serde::{Deserialize, Serialize};

use crate::interpolate;

/// Error in the description of a planform or of its lattice discretization.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// No span stations were given.
    #[error("Invalid planform: no span stations")]
    EmptyStations,
    /// A station table doesn't have one value per span station.
    #[error("Invalid planform: `{field}` has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Name of the offending table.
        field: &'static str,
        /// Number of span stations.
        expected: usize,
        /// Number of values given.
        actual: usize,
    },
    /// Span stations aren't strictly increasing.
    #[error("Invalid planform: span stations must be strictly increasing (at station {index})")]
    StationsNotIncreasing {
        /// Index of the first station not greater than its predecessor.
        index: usize,
    },
    /// A scalar dimension is zero, negative or not finite.
    #[error("Invalid planform: `{field}` must be finite and positive, got {value}")]
    NonPositive {
        /// Name of the offending dimension.
        field: &'static str,
        /// The value given.
        value: f64,
    },
    /// A chord is negative or not finite.
    #[error("Invalid planform: chord {value} at station {index}")]
    InvalidChord {
        /// Index of the station.
        index: usize,
        /// The value given.
        value: f64,
    },
    /// The vortex semispan ratio gives fewer than two panels
    /// or more than [`MAX_PANELS`][crate::lattice::MAX_PANELS].
    #[error("Invalid lattice: vortex semispan ratio {0} gives too few or too many panels")]
    InvalidRatio(f64),
    /// The Mach number is outside the subsonic range `[0, 1)`.
    #[error("Invalid lattice: Mach number {0} is outside [0, 1)")]
    InvalidMach(f64),
    /// A per-panel angle array doesn't have one value per panel
    /// and the lattice was configured to reject it
    /// (see [`ShapePolicy`][crate::ShapePolicy]).
    #[error("Invalid lattice: `{field}` has {actual} values but the lattice has {expected} panels")]
    PanelCountMismatch {
        /// Name of the offending array.
        field: &'static str,
        /// Number of lattice panels.
        expected: usize,
        /// Number of values given.
        actual: usize,
    },
}

/// Geometry of one half of a lifting surface.
///
/// Chord and leading edge position are tables over span stations
/// and are interpolated linearly between them.
/// Dihedral, twist and zero-lift angle are given per lattice panel
/// (one value for each of the panels generated
/// by [`LatticeConfig`][crate::LatticeConfig]);
/// an empty array means zero everywhere.
/// Lengths are in metres and angles in radians.
///
/// Deserializing a planform runs the same validation as [`new`][Self::new].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlanformData")]
pub struct PlanformGeometry {
    semispan: f64,
    surface: f64,
    stations: Vec<f64>,
    chords: Vec<f64>,
    x_le: Vec<f64>,
    dihedral: Vec<f64>,
    twist: Vec<f64>,
    alpha_zero_lift: Vec<f64>,
}

/// Unvalidated form of a planform used for deserialization.
#[derive(Deserialize)]
struct PlanformData {
    semispan: f64,
    surface: f64,
    stations: Vec<f64>,
    chords: Vec<f64>,
    x_le: Vec<f64>,
    #[serde(default)]
    dihedral: Vec<f64>,
    #[serde(default)]
    twist: Vec<f64>,
    #[serde(default)]
    alpha_zero_lift: Vec<f64>,
}

impl TryFrom<PlanformData> for PlanformGeometry {
    type Error = GeometryError;

    fn try_from(d: PlanformData) -> Result<Self, Self::Error> {
        Self::new(
            d.semispan,
            d.surface,
            d.stations,
            d.chords,
            d.x_le,
            d.dihedral,
            d.twist,
            d.alpha_zero_lift,
        )
    }
}

impl PlanformGeometry {
    /// Create and validate a planform.
    ///
    /// `stations`, `chords` and `x_le` form the spanwise table
    /// and must have equal, nonzero length with strictly increasing stations.
    /// `semispan` and `surface` must be positive;
    /// degenerate surfaces are rejected here rather than
    /// producing NaN lift coefficients later.
    /// The per-panel arrays are only checked against the panel count
    /// when the lattice is built.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        semispan: f64,
        surface: f64,
        stations: Vec<f64>,
        chords: Vec<f64>,
        x_le: Vec<f64>,
        dihedral: Vec<f64>,
        twist: Vec<f64>,
        alpha_zero_lift: Vec<f64>,
    ) -> Result<Self, GeometryError> {
        for (field, value) in [("semispan", semispan), ("surface", surface)] {
            if !(value.is_finite() && value > 0.) {
                return Err(GeometryError::NonPositive { field, value });
            }
        }

        if stations.is_empty() {
            return Err(GeometryError::EmptyStations);
        }
        for (field, table) in [("chords", &chords), ("x_le", &x_le)] {
            if table.len() != stations.len() {
                return Err(GeometryError::LengthMismatch {
                    field,
                    expected: stations.len(),
                    actual: table.len(),
                });
            }
        }
        if let Some(index) = interpolate::find_non_increasing(&stations) {
            return Err(GeometryError::StationsNotIncreasing { index });
        }
        if let Some((index, &value)) = chords
            .iter()
            .enumerate()
            .find(|(_, c)| !(c.is_finite() && **c >= 0.))
        {
            return Err(GeometryError::InvalidChord { index, value });
        }

        Ok(Self {
            semispan,
            surface,
            stations,
            chords,
            x_le,
            dihedral,
            twist,
            alpha_zero_lift,
        })
    }

    /// A straight-tapered planform with a constant leading edge sweep angle,
    /// no dihedral, no twist and uncambered sections.
    ///
    /// The reference surface is the trapezoid area of both halves.
    /// ```
    /// # use blackwell::PlanformGeometry;
    /// let wing = PlanformGeometry::trapezoidal(5., 2., 1., 0.).unwrap();
    /// assert_eq!(wing.surface(), 15.);
    /// assert_eq!(wing.chord_at(2.5), 1.5);
    /// ```
    pub fn trapezoidal(
        semispan: f64,
        root_chord: f64,
        tip_chord: f64,
        le_sweep: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(
            semispan,
            (root_chord + tip_chord) * semispan,
            vec![0., semispan],
            vec![root_chord, tip_chord],
            vec![0., semispan * le_sweep.tan()],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    /// Replace the per-panel dihedral angles.
    pub fn with_dihedral(mut self, dihedral: Vec<f64>) -> Self {
        self.dihedral = dihedral;
        self
    }

    /// Replace the per-panel geometric twist angles.
    pub fn with_twist(mut self, twist: Vec<f64>) -> Self {
        self.twist = twist;
        self
    }

    /// Replace the per-panel section zero-lift angles.
    pub fn with_alpha_zero_lift(mut self, alpha_zero_lift: Vec<f64>) -> Self {
        self.alpha_zero_lift = alpha_zero_lift;
        self
    }

    /// Half of the span.
    #[inline]
    pub fn semispan(&self) -> f64 {
        self.semispan
    }

    /// Reference area of the whole surface (both halves).
    #[inline]
    pub fn surface(&self) -> f64 {
        self.surface
    }

    /// Mean geometric chord `S / b`.
    #[inline]
    pub fn mean_chord(&self) -> f64 {
        self.surface / (2. * self.semispan)
    }

    /// Aspect ratio `b² / S`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        (2. * self.semispan).powi(2) / self.surface
    }

    /// Span stations of the chord and leading edge tables.
    #[inline]
    pub fn stations(&self) -> &[f64] {
        &self.stations
    }

    /// Chords at the span stations.
    #[inline]
    pub fn chords(&self) -> &[f64] {
        &self.chords
    }

    /// Leading edge x coordinates at the span stations.
    #[inline]
    pub fn x_le(&self) -> &[f64] {
        &self.x_le
    }

    /// Per-panel dihedral angles as given (possibly empty).
    #[inline]
    pub fn dihedral(&self) -> &[f64] {
        &self.dihedral
    }

    /// Per-panel twist angles as given (possibly empty).
    #[inline]
    pub fn twist(&self) -> &[f64] {
        &self.twist
    }

    /// Per-panel zero-lift angles as given (possibly empty).
    #[inline]
    pub fn alpha_zero_lift(&self) -> &[f64] {
        &self.alpha_zero_lift
    }

    /// Chord at an arbitrary span station.
    pub fn chord_at(&self, y: f64) -> f64 {
        interpolate::interpolate(&self.stations, &self.chords, y)
    }

    /// Leading edge x coordinate at an arbitrary span station.
    pub fn x_le_at(&self, y: f64) -> f64 {
        interpolate::interpolate(&self.stations, &self.x_le, y)
    }
}
