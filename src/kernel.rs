//! Closed-form velocities induced by a single horseshoe vortex.
//!
//! A horseshoe is a bound segment of half-width `s`,
//! inclined by the dihedral angle `phi` in the spanwise-vertical plane,
//! plus two trailing legs running from its ends to infinity downstream.
//! The functions here take the position of the field point
//! relative to the centre of the bound segment as `(xs, y, z)`,
//! where `xs` is positive *upstream* (i.e. `xs = -(x_field - x_vortex)`
//! in the lattice's x-aft coordinates), `y` is spanwise and `z` vertical.
//!
//! Values are velocities per unit circulation multiplied by 4π
//! (the `1/4π` of the Biot-Savart law is left to the caller).
//!
//! Formulas follow NASA TN D-5335 (Blackwell, 1969).

use crate::Vec3;

/// Relative tolerance for vanishing denominators.
///
/// Squared lengths below `KERNEL_EPSILON * s²` and lengths below
/// `sqrt(KERNEL_EPSILON) * s`, with `s` the vortex half-width,
/// are treated as zero and the corresponding term contributes nothing.
/// This happens when the field point lies on one of the vortex filaments.
/// Scaling the tolerance with `s` keeps results independent of the size of the surface.
pub const KERNEL_EPSILON: f64 = 1e-12;

#[inline]
fn guarded_div(num: f64, den: f64, eps: f64) -> f64 {
    if den.abs() <= eps {
        0.
    } else {
        num / den
    }
}

/// Quantities shared by the downwash and sidewash formulas.
struct HorseshoeTerms {
    cos_phi: f64,
    sin_phi: f64,
    /// Bound segment factor, `1/d` times the difference of the projections
    /// of the unit vectors from both segment ends onto the segment.
    bound: f64,
    /// Lateral and vertical offsets from the `-s` end.
    minus: (f64, f64),
    /// Lateral and vertical offsets from the `+s` end.
    plus: (f64, f64),
    /// Trailing leg factors `(1 - xs/r) / ρ²` for both ends.
    leg_minus: f64,
    leg_plus: f64,
}

impl HorseshoeTerms {
    fn new(xs: f64, y: f64, z: f64, s: f64, phi: f64) -> Self {
        let (sin_phi, cos_phi) = phi.sin_cos();

        let (y_m, z_m) = (y - s * cos_phi, z - s * sin_phi);
        let (y_p, z_p) = (y + s * cos_phi, z + s * sin_phi);
        let rho_sq_m = y_m.powi(2) + z_m.powi(2);
        let rho_sq_p = y_p.powi(2) + z_p.powi(2);
        let r_m = f64::sqrt(xs.powi(2) + rho_sq_m);
        let r_p = f64::sqrt(xs.powi(2) + rho_sq_p);

        let eps_len = KERNEL_EPSILON.sqrt() * s;
        let eps_sq = KERNEL_EPSILON * s * s;

        let projections = guarded_div(y_p * cos_phi + z_p * sin_phi, r_p, eps_len)
            - guarded_div(y_m * cos_phi + z_m * sin_phi, r_m, eps_len);
        let d = xs.powi(2) + (z * cos_phi - y * sin_phi).powi(2);

        Self {
            cos_phi,
            sin_phi,
            bound: guarded_div(projections, d, eps_sq),
            minus: (y_m, z_m),
            plus: (y_p, z_p),
            leg_minus: guarded_div(1. - guarded_div(xs, r_m, eps_len), rho_sq_m, eps_sq),
            leg_plus: guarded_div(1. - guarded_div(xs, r_p, eps_len), rho_sq_p, eps_sq),
        }
    }
}

/// Vertical velocity induced by a horseshoe vortex.
///
/// See the [module-level docs][self] for the meaning of the arguments.
pub fn downwash(xs: f64, y: f64, z: f64, s: f64, phi: f64) -> f64 {
    let t = HorseshoeTerms::new(xs, y, z, s, phi);
    -xs * t.cos_phi * t.bound - t.minus.0 * t.leg_minus + t.plus.0 * t.leg_plus
}

/// Lateral velocity induced by a horseshoe vortex.
///
/// Structurally the same as [`downwash`] with the lateral and vertical
/// offsets exchanged in the trailing leg terms.
pub fn sidewash(xs: f64, y: f64, z: f64, s: f64, phi: f64) -> f64 {
    let t = HorseshoeTerms::new(xs, y, z, s, phi);
    xs * t.sin_phi * t.bound + t.minus.1 * t.leg_minus - t.plus.1 * t.leg_plus
}

/// Downwash at `control` from the horseshoe centred at `vortex`,
/// without the mirror image.
pub fn downwash_at(control: &Vec3, vortex: &Vec3, s: f64, phi: f64) -> f64 {
    let d = control - vortex;
    downwash(-d.x, d.y, d.z, s, phi)
}

/// Sidewash at `control` from the horseshoe centred at `vortex`,
/// without the mirror image.
pub fn sidewash_at(control: &Vec3, vortex: &Vec3, s: f64, phi: f64) -> f64 {
    let d = control - vortex;
    sidewash(-d.x, d.y, d.z, s, phi)
}

/// The mirror image of a point across the root (`y = 0`) plane.
#[inline]
pub fn mirror(point: &Vec3) -> Vec3 {
    Vec3::new(point.x, -point.y, point.z)
}

/// Downwash at `control` from the horseshoe centred at `vortex`
/// and its mirror image on the other half of a symmetric surface.
///
/// The mirror horseshoe has the same `x` and `z`, negated `y`
/// and negated dihedral.
pub fn downwash_signed(control: &Vec3, vortex: &Vec3, s: f64, phi: f64) -> f64 {
    downwash_at(control, vortex, s, phi) + downwash_at(control, &mirror(vortex), s, -phi)
}

/// Sidewash at `control` from the horseshoe centred at `vortex`
/// and its mirror image on the other half of a symmetric surface.
pub fn sidewash_signed(control: &Vec3, vortex: &Vec3, s: f64, phi: f64) -> f64 {
    sidewash_at(control, vortex, s, phi) + sidewash_at(control, &mirror(vortex), s, -phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, relative_eq};

    /// Velocity (times 4π, per unit circulation) induced by a straight
    /// vortex filament from `a` to `b`, straight from the Biot-Savart law.
    fn filament_velocity(p: &Vec3, a: &Vec3, b: &Vec3) -> Vec3 {
        let r1 = p - a;
        let r2 = p - b;
        let r0 = b - a;
        let cross = r1.cross(&r2);
        cross / cross.norm_squared() * r0.dot(&(r1.normalize() - r2.normalize()))
    }

    /// Horseshoe from far downstream to the `-s` end, across to the `+s` end
    /// and back downstream, in the kernel's coordinates.
    fn horseshoe_velocity(p: &Vec3, s: f64, phi: f64) -> Vec3 {
        let a = Vec3::new(0., -s * phi.cos(), -s * phi.sin());
        let b = Vec3::new(0., s * phi.cos(), s * phi.sin());
        let far = Vec3::new(-1e8, 0., 0.);
        filament_velocity(p, &(a + far), &a)
            + filament_velocity(p, &a, &b)
            + filament_velocity(p, &b, &(b + far))
    }

    #[test]
    fn kernels_match_biot_savart() {
        let s = 0.4;
        let points = [
            Vec3::new(-0.7, 0.3, 0.1),
            Vec3::new(1.2, -0.9, 0.4),
            Vec3::new(-2.5, 1.7, -0.6),
            Vec3::new(0.3, 0.05, -1.1),
        ];
        for phi in [0., 0.3, -0.5] {
            for p in &points {
                let expected = horseshoe_velocity(p, s, phi);
                let w = downwash(p.x, p.y, p.z, s, phi);
                let v = sidewash(p.x, p.y, p.z, s, phi);
                assert!(
                    relative_eq!(w, expected.z, max_relative = 1e-6),
                    "downwash at {p:?}, phi {phi}: expected {}, got {w}",
                    expected.z
                );
                assert!(
                    relative_eq!(v, expected.y, epsilon = 1e-9, max_relative = 1e-6),
                    "sidewash at {p:?}, phi {phi}: expected {}, got {v}",
                    expected.y
                );
            }
        }
    }

    /// Far downstream the horseshoe looks like a pair of infinite line vortices,
    /// each inducing 2/ρ at the centre between them.
    #[test]
    fn far_wake_limit() {
        let s = 0.5;
        let w = downwash(-1e7, 0., 0., s, 0.);
        assert_relative_eq!(w, 4. / s, max_relative = 1e-6);
    }

    #[test]
    fn planar_symmetries() {
        for (xs, y) in [(-0.5, 0.2), (0.8, 1.3), (-3.0, 0.05)] {
            assert_relative_eq!(
                downwash(xs, y, 0., 0.3, 0.),
                downwash(xs, -y, 0., 0.3, 0.),
                max_relative = 1e-12
            );
            assert_eq!(sidewash(xs, y, 0., 0.3, 0.), 0.);
        }
    }

    #[test]
    fn points_on_filaments_stay_finite() {
        let s = 0.25;
        // on a trailing leg, on the bound segment, and at a corner
        for (xs, y) in [(-1.0, s), (0.0, 0.1), (0.0, -s)] {
            let w = downwash(xs, y, 0., s, 0.);
            let v = sidewash(xs, y, 0., s, 0.1);
            assert!(w.is_finite() && v.is_finite(), "got w {w}, v {v} at ({xs}, {y})");
        }
    }

    /// The mirrored kernels add a horseshoe at `(x, -y, z)` with negated dihedral,
    /// which in the kernel's relative coordinates has the lateral offset `y_c + y_v`.
    #[test]
    fn signed_kernels_decompose() {
        let s = 0.2;
        let vortices = [Vec3::new(0.25, 0.2, 0.), Vec3::new(0.4, 1.4, 0.12)];
        let controls = [Vec3::new(0.75, 0.2, 0.), Vec3::new(0.9, 1.0, 0.08)];
        for phi in [0., 0.08] {
            for c in &controls {
                for v in &vortices {
                    let (xs, z) = (v.x - c.x, c.z - v.z);
                    let w_sum = downwash(xs, c.y - v.y, z, s, phi)
                        + downwash(xs, c.y + v.y, z, s, -phi);
                    let v_sum = sidewash(xs, c.y - v.y, z, s, phi)
                        + sidewash(xs, c.y + v.y, z, s, -phi);
                    assert_relative_eq!(downwash_signed(c, v, s, phi), w_sum, max_relative = 1e-12);
                    assert_relative_eq!(
                        sidewash_signed(c, v, s, phi),
                        v_sum,
                        epsilon = 1e-14,
                        max_relative = 1e-12
                    );
                }
            }
        }
        assert_eq!(mirror(&Vec3::new(1., 2., 3.)), Vec3::new(1., -2., 3.));
    }

    /// Kernel values scale inversely with length, down to tiny surfaces.
    #[test]
    fn kernels_scale_with_length() {
        let (xs, y, z, s, phi) = (-0.6, 0.35, 0.05, 0.25, 0.1);
        for k in [1e-6, 1e-3, 1e3] {
            assert_relative_eq!(
                downwash(k * xs, k * y, k * z, k * s, phi) * k,
                downwash(xs, y, z, s, phi),
                max_relative = 1e-9
            );
            assert_relative_eq!(
                sidewash(k * xs, k * y, k * z, k * s, phi) * k,
                sidewash(xs, y, z, s, phi),
                max_relative = 1e-9
            );
        }
    }
}
