//! Spanwise distributions derived from a solved circulation.

use itertools::izip;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{interpolate, Lattice, PlanformGeometry};

/// Overall lift coefficient `16π/S Σ Γ 2s` of a nondimensional circulation
/// distribution whose horseshoes have half-width `vortex_semispan`.
pub fn lift_coefficient(gamma_signed: &[f64], vortex_semispan: f64, surface: f64) -> f64 {
    let total: f64 = gamma_signed.iter().map(|g| g * 2. * vortex_semispan).sum();
    16. * PI / surface * total
}

/// Load distributions sampled at a set of span stations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpanwiseLoading {
    /// Span stations the other fields are sampled at.
    pub stations: Vec<f64>,
    /// Dimensional circulation `4π V Γ`, in m²/s.
    pub gamma: Vec<f64>,
    /// Chord times section lift coefficient.
    pub ccl: Vec<f64>,
    /// Section lift coefficient.
    pub cl: Vec<f64>,
    /// Circulation normalized so that it integrates to the semispan.
    pub load: Vec<f64>,
}

impl SpanwiseLoading {
    /// Distributions at the panel stations followed by the tip.
    ///
    /// `gamma_signed` has one value per panel plus a zero for the tip.
    /// If the circulation sums to zero, the chord loading, section lift
    /// and normalized load are all zero.
    pub(crate) fn on_lattice(
        geometry: &PlanformGeometry,
        lattice: &Lattice,
        gamma_signed: &[f64],
        cl_overall: f64,
        true_airspeed: f64,
    ) -> Self {
        let stations = lattice.stations_with_tip();
        debug_assert_eq!(stations.len(), gamma_signed.len());

        let semispan = lattice.semispan();
        let total: f64 = gamma_signed
            .iter()
            .map(|g| g * 2. * lattice.vortex_semispan())
            .sum();
        // scale from Γ to c·cl and to the normalized load
        let (ccl_scale, load_scale) = if total == 0. {
            (0., 0.)
        } else {
            (
                cl_overall * geometry.mean_chord() * semispan / total,
                semispan / total,
            )
        };

        let gamma = gamma_signed
            .iter()
            .map(|g| 4. * PI * true_airspeed * g)
            .collect();
        let ccl: Vec<f64> = gamma_signed.iter().map(|g| ccl_scale * g).collect();
        let cl = izip!(&stations, &ccl)
            .map(|(&y, &ccl)| {
                let chord = geometry.chord_at(y);
                if chord > 0. {
                    ccl / chord
                } else {
                    0.
                }
            })
            .collect();
        let load = gamma_signed.iter().map(|g| load_scale * g).collect();

        Self {
            stations,
            gamma,
            ccl,
            cl,
            load,
        }
    }

    /// Linearly re-sample the distributions onto other span stations.
    ///
    /// If the last of the new stations is at or beyond the last current station
    /// (normally the tip), its section lift coefficient is set to zero.
    pub fn resample(&self, stations: &[f64]) -> Self {
        let at = |values: &[f64]| interpolate::interpolate_all(&self.stations, values, stations);
        let mut cl = at(&self.cl);
        if let (Some(&last), Some(&tip)) = (stations.last(), self.stations.last()) {
            if last >= tip {
                if let Some(cl_tip) = cl.last_mut() {
                    *cl_tip = 0.;
                }
            }
        }
        Self {
            stations: stations.to_vec(),
            gamma: at(&self.gamma),
            ccl: at(&self.ccl),
            cl,
            load: at(&self.load),
        }
    }

    /// Number of stations.
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether there are no stations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// The result of solving a lattice at one angle of attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Root angle of attack in radians.
    pub alpha: f64,
    /// Overall lift coefficient.
    pub cl_overall: f64,
    /// Nondimensional circulation of each panel, followed by a zero for the tip.
    pub gamma_signed: Vec<f64>,
    /// Distributions at the panel stations and the tip.
    pub lattice_loading: SpanwiseLoading,
    /// Distributions at the output stations,
    /// evenly spaced from the root to the tip.
    pub loading: SpanwiseLoading,
}

impl Solution {
    pub(crate) fn new(
        geometry: &PlanformGeometry,
        lattice: &Lattice,
        alpha: f64,
        gamma_signed: Vec<f64>,
        true_airspeed: f64,
        output_stations: &[f64],
    ) -> Self {
        let cl_overall =
            lift_coefficient(&gamma_signed, lattice.vortex_semispan(), geometry.surface());
        let lattice_loading = SpanwiseLoading::on_lattice(
            geometry,
            lattice,
            &gamma_signed,
            cl_overall,
            true_airspeed,
        );
        let loading = lattice_loading.resample(output_stations);
        Self {
            alpha,
            cl_overall,
            gamma_signed,
            lattice_loading,
            loading,
        }
    }

    /// Re-sample the distributions onto arbitrary span stations.
    ///
    /// See [`SpanwiseLoading::resample`] for the treatment of the tip.
    #[inline]
    pub fn resample(&self, stations: &[f64]) -> SpanwiseLoading {
        self.lattice_loading.resample(stations)
    }
}
