//! Least squares solver.
//!
//! Polynomial fits solve small problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! where `x_i` is a row of a (tall) Vandermonde matrix.
//!
//! Implementation choices:
//! - We use SVD rather than the normal equations, which square the condition
//!   number of the design matrix and break down quickly as the degree grows.
//! - Nalgebra's `QR::solve` is intended for square systems and panics on tall
//!   matrices, so SVD is also the practical orthogonal solver here.
//! - Rank deficiency is reported, never papered over: a singular value below
//!   the relative cutoff means the fit is not uniquely determined.

use nalgebra::{DMatrix, DVector};

/// Singular values below `RANK_RTOL * σ_max` are treated as zero.
pub const RANK_RTOL: f64 = 1e-10;

/// Numerical rank of `x` under the relative cutoff [`RANK_RTOL`].
pub fn numerical_rank(x: &DMatrix<f64>) -> usize {
    let sv = x.clone().singular_values();
    let s_max = sv.iter().copied().fold(0.0_f64, f64::max);
    if !(s_max.is_finite() && s_max > 0.0) {
        return 0;
    }
    sv.iter().filter(|&&s| s > RANK_RTOL * s_max).count()
}

/// Solve a full-rank least squares problem using SVD.
///
/// Returns `None` when the design matrix is rank deficient (or has fewer rows
/// than columns) or when the solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() < x.ncols() || x.nrows() != y.len() {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let s_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    if !(s_max.is_finite() && s_max > 0.0) {
        return None;
    }

    let cutoff = RANK_RTOL * s_max;
    if svd.singular_values.iter().any(|&s| s <= cutoff) {
        return None;
    }

    let beta = svd.solve(y, cutoff).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}
