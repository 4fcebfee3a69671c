//! Assembly and solution of the flow tangency system.
//!
//! Row `i` of the influence matrix gives the normal velocity at control point `i`
//! induced by a unit (times 4π) circulation on each horseshoe and its mirror image.
//! For a dihedral panel the normal velocity combines the downwash
//! and the sidewash weighted by the tangent of the panel's dihedral angle.

use nalgebra::{DMatrix, DVector};

use crate::{kernel, Lattice, SolveError};

/// Smallest accepted ratio between the smallest and largest pivot
/// of the LU factorization before a matrix is considered singular.
pub const PIVOT_RATIO_TOLERANCE: f64 = 1e-12;

/// Assemble the full influence matrix of a lattice.
///
/// `M[i][j] = w(c_i, v_j, s, δ_j) - v(c_i, v_j, s, δ_j) tan δ_i`,
/// where `w` and `v` are the mirrored downwash and sidewash kernels,
/// `c` are control points, `v` vortex points and `δ` dihedral angles.
pub fn assemble(lattice: &Lattice) -> DMatrix<f64> {
    let s = lattice.vortex_semispan();
    let panels = lattice.panels();
    DMatrix::from_fn(panels.len(), panels.len(), |i, j| {
        let (ctl, vtx) = (&panels[i], &panels[j]);
        let w = kernel::downwash_signed(&ctl.control_point, &vtx.vortex_point, s, vtx.dihedral);
        let v = kernel::sidewash_signed(&ctl.control_point, &vtx.vortex_point, s, vtx.dihedral);
        w - v * ctl.dihedral.tan()
    })
}

/// Assemble the matrix of mirrored downwash alone,
/// used to evaluate the induced vertical velocity from a solved circulation.
pub fn downwash_matrix(lattice: &Lattice) -> DMatrix<f64> {
    let s = lattice.vortex_semispan();
    let panels = lattice.panels();
    DMatrix::from_fn(panels.len(), panels.len(), |i, j| {
        kernel::downwash_signed(
            &panels[i].control_point,
            &panels[j].vortex_point,
            s,
            panels[j].dihedral,
        )
    })
}

/// Solve `M Γ = α` for the nondimensional circulation of every panel.
///
/// Uses LU decomposition with partial pivoting.
/// The matrix is rejected as singular if the factorization fails
/// or its pivots span more than `1 / PIVOT_RATIO_TOLERANCE` in magnitude.
///
/// Panics if the matrix isn't square or doesn't match the length of `alpha`.
pub fn solve_circulation(
    matrix: &DMatrix<f64>,
    alpha: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    assert!(matrix.is_square(), "influence matrix must be square");
    assert_eq!(
        matrix.nrows(),
        alpha.len(),
        "angle distribution doesn't match the influence matrix"
    );
    if matrix.is_empty() {
        return Err(SolveError::SingularMatrix);
    }

    let lu = matrix.clone().lu();
    if !lu.is_invertible() {
        return Err(SolveError::SingularMatrix);
    }

    let pivots = lu.u().diagonal().map(f64::abs);
    if pivots.iter().any(|p| !p.is_finite()) {
        return Err(SolveError::SingularMatrix);
    }
    let ratio = pivots.iter().fold(f64::INFINITY, |a, &b| a.min(b))
        / pivots.iter().fold(0., |a: f64, &b| a.max(b));
    // also catches 0/0 from an all-zero diagonal
    if !(ratio >= PIVOT_RATIO_TOLERANCE) {
        log::debug!("rejecting influence matrix with pivot ratio {ratio:e}");
        return Err(SolveError::SingularMatrix);
    }

    let gamma = lu.solve(alpha).ok_or(SolveError::SingularMatrix)?;
    if gamma.iter().any(|g| !g.is_finite()) {
        return Err(SolveError::NonFinite);
    }
    Ok(gamma)
}
