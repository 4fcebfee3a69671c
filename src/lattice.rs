//! Discretization of a planform into a lattice of horseshoe vortex panels.

use serde::{Deserialize, Serialize};

use crate::{interpolate, GeometryError, PlanformGeometry, Vec3};

//
// configuration
//

/// Largest number of panels a [`LatticeConfig`] may generate.
/// Both influence matrices are dense, so this bounds their size to `MAX_PANELS²` entries each.
pub const MAX_PANELS: usize = 4096;

/// What to do with a per-panel angle array
/// whose length doesn't match the number of lattice panels.
///
/// Empty arrays always mean zero everywhere and are never affected by this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapePolicy {
    /// Replace the array with zeros and log a warning.
    #[default]
    ZeroFill,
    /// Fail with [`GeometryError::PanelCountMismatch`].
    Reject,
}

/// Parameters for the construction of a [`Lattice`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Ratio of a vortex's half-width to the semispan.
    /// The number of panels is `floor(1 / (2 * ratio))`
    /// and must be between 2 and [`MAX_PANELS`]. Default: 1/40 (20 panels).
    pub vortex_semispan_ratio: f64,
    /// Free-stream Mach number, used for the Prandtl-Glauert stretch
    /// of panel x coordinates and for the true airspeed. Default: 0.
    pub mach: f64,
    /// Altitude in metres, used for the true airspeed. Default: 0.
    pub altitude: f64,
    /// Handling of per-panel arrays of the wrong length. Default: [`ShapePolicy::ZeroFill`].
    pub shape_policy: ShapePolicy,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            vortex_semispan_ratio: 1. / 40.,
            mach: 0.,
            altitude: 0.,
            shape_policy: ShapePolicy::ZeroFill,
        }
    }
}

impl LatticeConfig {
    /// Config with the given number of panels and other parameters at their defaults.
    pub fn with_panels(panel_count: usize) -> Self {
        Self {
            vortex_semispan_ratio: 1. / (2. * panel_count as f64),
            ..Default::default()
        }
    }

    /// Number of panels generated by this configuration.
    ///
    /// A small tolerance is applied before rounding down
    /// so that e.g. a ratio of 0.05 gives 10 panels and not 9.
    pub fn panel_count(&self) -> usize {
        let exact = 1. / (2. * self.vortex_semispan_ratio);
        if !exact.is_finite() || exact < 0. {
            return 0;
        }
        (exact * (1. + 1e-9)).floor() as usize
    }

    /// Compressibility stretch factor `1 / sqrt(1 - M²)`.
    #[inline]
    pub fn prandtl_glauert(&self) -> f64 {
        1. / f64::sqrt(1. - self.mach.powi(2))
    }

    fn validate(&self) -> Result<usize, GeometryError> {
        if !(0.0..1.0).contains(&self.mach) {
            return Err(GeometryError::InvalidMach(self.mach));
        }
        let count = self.panel_count();
        if !(self.vortex_semispan_ratio > 0.) || !(2..=MAX_PANELS).contains(&count) {
            return Err(GeometryError::InvalidRatio(self.vortex_semispan_ratio));
        }
        Ok(count)
    }
}

//
// lattice
//

/// One spanwise panel of the lattice, carrying a horseshoe vortex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panel {
    /// Index of the panel from root to tip.
    pub index: usize,
    /// Span station of the panel's centre.
    pub station: f64,
    /// Local chord.
    pub chord: f64,
    /// Point on the local quarter-chord line where the bound vortex sits.
    pub vortex_point: Vec3,
    /// Point on the local three-quarter-chord line
    /// where flow tangency is enforced.
    pub control_point: Vec3,
    /// Local dihedral angle.
    pub dihedral: f64,
    /// Local geometric twist.
    pub twist: f64,
    /// Local section zero-lift angle.
    pub alpha_zero_lift: f64,
}

impl Panel {
    /// Effective angle of attack of the panel's section
    /// at the given root angle of attack.
    #[inline]
    pub fn effective_alpha(&self, alpha: f64) -> f64 {
        alpha + self.twist - self.alpha_zero_lift
    }
}

/// The panels of one half of a symmetric lifting surface.
///
/// Built once per geometry and shared by every solve on it.
#[derive(Clone, Debug)]
pub struct Lattice {
    panels: Vec<Panel>,
    vortex_semispan: f64,
    semispan: f64,
}

impl Lattice {
    /// Discretize a planform.
    ///
    /// Panel centres are evenly spaced between one vortex half-width
    /// from the root and one vortex half-width from the tip,
    /// so that the panels tile the semispan exactly.
    pub fn discretize(
        geometry: &PlanformGeometry,
        config: &LatticeConfig,
    ) -> Result<Self, GeometryError> {
        let count = config.validate()?;
        let semispan = geometry.semispan();
        let vortex_semispan = config.vortex_semispan_ratio * semispan;
        let stretch = config.prandtl_glauert();

        let dihedral = per_panel("dihedral", geometry.dihedral(), count, config.shape_policy)?;
        let twist = per_panel("twist", geometry.twist(), count, config.shape_policy)?;
        let alpha_zero_lift = per_panel(
            "alpha_zero_lift",
            geometry.alpha_zero_lift(),
            count,
            config.shape_policy,
        )?;

        let stations = interpolate::linspace(vortex_semispan, semispan - vortex_semispan, count);
        let panels: Vec<Panel> = stations
            .iter()
            .enumerate()
            .map(|(index, &y)| {
                let chord = geometry.chord_at(y);
                let x_le = geometry.x_le_at(y);
                let z = dihedral[index].tan() * y;
                Panel {
                    index,
                    station: y,
                    chord,
                    vortex_point: Vec3::new((x_le + 0.25 * chord) * stretch, y, z),
                    control_point: Vec3::new((x_le + 0.75 * chord) * stretch, y, z),
                    dihedral: dihedral[index],
                    twist: twist[index],
                    alpha_zero_lift: alpha_zero_lift[index],
                }
            })
            .collect();

        log::debug!(
            "discretized semispan {semispan} into {count} panels of half-width {vortex_semispan}"
        );

        Ok(Self {
            panels,
            vortex_semispan,
            semispan,
        })
    }

    /// Build a lattice from explicitly given panels.
    ///
    /// No checks are made on the panels;
    /// this is meant for custom discretizations and experiments.
    /// Panel indices are overwritten with their position in the list.
    pub fn from_panels(mut panels: Vec<Panel>, vortex_semispan: f64, semispan: f64) -> Self {
        for (i, p) in panels.iter_mut().enumerate() {
            p.index = i;
        }
        Self {
            panels,
            vortex_semispan,
            semispan,
        }
    }

    /// The panels from root to tip.
    #[inline]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Number of panels.
    #[inline]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the lattice has no panels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Half-width of each horseshoe vortex's bound segment.
    #[inline]
    pub fn vortex_semispan(&self) -> f64 {
        self.vortex_semispan
    }

    /// Semispan of the discretized surface.
    #[inline]
    pub fn semispan(&self) -> f64 {
        self.semispan
    }

    /// Panel stations followed by the tip station.
    /// This is the grid the solved distributions are first computed on.
    pub fn stations_with_tip(&self) -> Vec<f64> {
        self.panels
            .iter()
            .map(|p| p.station)
            .chain(std::iter::once(self.semispan))
            .collect()
    }

    /// Effective angle of attack of every panel at the given root angle of attack.
    pub fn alpha_distribution(&self, alpha: f64) -> nalgebra::DVector<f64> {
        nalgebra::DVector::from_iterator(
            self.panels.len(),
            self.panels.iter().map(|p| p.effective_alpha(alpha)),
        )
    }
}

/// Expand a per-panel array according to the shape policy.
fn per_panel(
    field: &'static str,
    values: &[f64],
    count: usize,
    policy: ShapePolicy,
) -> Result<Vec<f64>, GeometryError> {
    if values.len() == count {
        return Ok(values.to_vec());
    }
    if values.is_empty() {
        return Ok(vec![0.; count]);
    }
    match policy {
        ShapePolicy::ZeroFill => {
            log::warn!(
                "`{field}` has {} values for {count} panels, replacing it with zeros",
                values.len()
            );
            Ok(vec![0.; count])
        }
        ShapePolicy::Reject => Err(GeometryError::PanelCountMismatch {
            field,
            expected: count,
            actual: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, relative_eq};
    use itertools::{izip, Itertools};

    #[test]
    fn panel_count_from_ratio() {
        let count = |ratio| {
            LatticeConfig {
                vortex_semispan_ratio: ratio,
                ..Default::default()
            }
            .panel_count()
        };
        assert_eq!(count(0.05), 10);
        assert_eq!(count(0.025), 20);
        assert_eq!(count(1. / 30.), 15);
        assert_eq!(count(0.04), 12);
        assert_eq!(LatticeConfig::default().panel_count(), 20);
        assert_eq!(LatticeConfig::with_panels(7).panel_count(), 7);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let wing = PlanformGeometry::trapezoidal(5., 1., 1., 0.).unwrap();
        let too_coarse = LatticeConfig {
            vortex_semispan_ratio: 0.3,
            ..Default::default()
        };
        assert_eq!(
            Lattice::discretize(&wing, &too_coarse).unwrap_err(),
            GeometryError::InvalidRatio(0.3)
        );
        let negative = LatticeConfig {
            vortex_semispan_ratio: -0.01,
            ..Default::default()
        };
        assert!(matches!(
            Lattice::discretize(&wing, &negative),
            Err(GeometryError::InvalidRatio(_))
        ));
        let too_fine = LatticeConfig {
            vortex_semispan_ratio: 1e-300,
            ..Default::default()
        };
        assert_eq!(
            Lattice::discretize(&wing, &too_fine).unwrap_err(),
            GeometryError::InvalidRatio(1e-300)
        );
        let finest = LatticeConfig::with_panels(MAX_PANELS);
        assert_eq!(finest.panel_count(), MAX_PANELS);
        assert!(finest.validate().is_ok());
        assert!(LatticeConfig::with_panels(MAX_PANELS + 1).validate().is_err());
        let supersonic = LatticeConfig {
            mach: 1.2,
            ..Default::default()
        };
        assert_eq!(
            Lattice::discretize(&wing, &supersonic).unwrap_err(),
            GeometryError::InvalidMach(1.2)
        );
    }

    /// Panels tile the semispan and points sit at the quarter
    /// and three-quarter chords, stretched by the Prandtl-Glauert factor.
    #[test]
    fn panel_placement() {
        let semispan = 6.;
        let sweep = 20f64.to_radians();
        let wing = PlanformGeometry::trapezoidal(semispan, 2., 1., sweep).unwrap();
        let config = LatticeConfig {
            mach: 0.6,
            ..LatticeConfig::with_panels(12)
        };
        let lattice = Lattice::discretize(&wing, &config).unwrap();

        assert_eq!(lattice.len(), 12);
        assert_relative_eq!(lattice.vortex_semispan(), 0.25);
        let width = 2. * lattice.vortex_semispan();

        let stations = lattice.stations_with_tip();
        assert_relative_eq!(stations[0], 0.25);
        assert_eq!(*stations.last().unwrap(), semispan);
        let spacing_ok = stations[..12]
            .iter()
            .tuple_windows()
            .all(|(a, b)| relative_eq!(b - a, width, max_relative = 1e-12));
        assert!(spacing_ok, "panels don't tile the semispan: {stations:?}");

        let stretch = 1. / 0.8;
        for p in lattice.panels() {
            let chord = 2. - p.station / semispan;
            let x_le = p.station * sweep.tan();
            assert_relative_eq!(p.chord, chord, max_relative = 1e-12);
            assert_relative_eq!(
                p.vortex_point.x,
                (x_le + 0.25 * chord) * stretch,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                p.control_point.x,
                (x_le + 0.75 * chord) * stretch,
                max_relative = 1e-12
            );
            assert_eq!(p.vortex_point.y, p.station);
            assert_eq!(p.vortex_point.z, 0.);
        }
    }

    #[test]
    fn dihedral_lifts_points() {
        let dihedral = vec![5f64.to_radians(); 10];
        let wing = PlanformGeometry::trapezoidal(5., 1., 1., 0.)
            .unwrap()
            .with_dihedral(dihedral.clone());
        let lattice = Lattice::discretize(&wing, &LatticeConfig::with_panels(10)).unwrap();
        for (p, d) in izip!(lattice.panels(), &dihedral) {
            assert_relative_eq!(p.vortex_point.z, d.tan() * p.station);
            assert_eq!(p.vortex_point.z, p.control_point.z);
        }
    }

    #[test]
    fn mismatched_panel_arrays_follow_policy() {
        let wing = PlanformGeometry::trapezoidal(5., 1., 1., 0.)
            .unwrap()
            .with_twist(vec![0.1; 3])
            .with_alpha_zero_lift(vec![-0.02; 10]);

        let lenient = LatticeConfig::with_panels(10);
        let lattice = Lattice::discretize(&wing, &lenient).unwrap();
        assert!(lattice.panels().iter().all(|p| p.twist == 0.));
        assert!(lattice.panels().iter().all(|p| p.alpha_zero_lift == -0.02));
        assert_relative_eq!(lattice.alpha_distribution(0.1)[4], 0.12);

        let strict = LatticeConfig {
            shape_policy: ShapePolicy::Reject,
            ..lenient
        };
        assert_eq!(
            Lattice::discretize(&wing, &strict).unwrap_err(),
            GeometryError::PanelCountMismatch {
                field: "twist",
                expected: 10,
                actual: 3
            }
        );
    }

    #[test]
    fn config_from_json() {
        let config: LatticeConfig =
            serde_json::from_str(r#"{ "mach": 0.3, "shape_policy": "reject" }"#).unwrap();
        assert_eq!(config.mach, 0.3);
        assert_eq!(config.shape_policy, ShapePolicy::Reject);
        assert_eq!(config.panel_count(), 20);
    }
}
