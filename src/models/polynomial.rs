//! Least squares polynomial `y = c_0 + c_1 x + ... + c_d x^d`.
//!
//! The Vandermonde matrix is built on a centered and scaled variable
//! `u = (x - center) / scale` with `u ∈ [-1, 1]`. Raw powers of canvas-sized
//! coordinates would make the design matrix hopelessly ill-conditioned at
//! moderate degrees. Coefficients are converted back to the raw `x` basis for
//! reporting; predictions are evaluated in the scaled basis.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;
use crate::math::{min_max, solve_least_squares};

#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub degree: usize,
    /// Raw-basis coefficients `[c_0, c_1, ..., c_d]`.
    pub coefficients: Vec<f64>,
    center: f64,
    scale: f64,
    scaled: Vec<f64>,
}

impl PolynomialFit {
    pub fn fit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self, FitError> {
        if degree == 0 {
            return Err(FitError::degenerate("polynomial degree must be at least 1"));
        }
        let (lo, hi) = min_max(xs).ok_or_else(|| FitError::degenerate("no points to fit"))?;
        let center = (lo + hi) / 2.0;
        let scale = (hi - lo) / 2.0;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FitError::degenerate(
                "x-values span no range; a polynomial cannot be fitted",
            ));
        }

        let n = xs.len();
        let p = degree + 1;
        let mut design = DMatrix::<f64>::zeros(n, p);
        for (i, &x) in xs.iter().enumerate() {
            let u = (x - center) / scale;
            let mut pow = 1.0;
            for j in 0..p {
                design[(i, j)] = pow;
                pow *= u;
            }
        }
        let target = DVector::from_column_slice(ys);

        let scaled: Vec<f64> = solve_least_squares(&design, &target)
            .ok_or_else(|| {
                FitError::degenerate(format!(
                    "design matrix is singular for degree {degree}: at least {p} distinct x-values are required"
                ))
            })?
            .iter()
            .copied()
            .collect();

        let coefficients = to_raw_basis(&scaled, center, scale);
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(FitError::degenerate(
                "polynomial coefficients overflow in the raw x basis",
            ));
        }

        Ok(Self {
            degree,
            coefficients,
            center,
            scale,
            scaled,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        let u = (x - self.center) / self.scale;
        self.scaled.iter().rev().fold(0.0, |acc, &a| acc * u + a)
    }
}

/// Expand `Σ a_k ((x - m) / s)^k` into `Σ c_j x^j`.
fn to_raw_basis(scaled: &[f64], center: f64, scale: f64) -> Vec<f64> {
    let p = scaled.len();
    let mut raw = vec![0.0; p];
    let mut inv_scale_k = 1.0;
    for (k, &a) in scaled.iter().enumerate() {
        let ak = a * inv_scale_k;
        // C(k, j) * (-m)^(k - j), walking j downward from k.
        let mut binom = 1.0;
        let mut neg_m_pow = 1.0;
        for j in (0..=k).rev() {
            raw[j] += ak * binom * neg_m_pow;
            if j > 0 {
                binom = binom * j as f64 / (k - j + 1) as f64;
                neg_m_pow *= -center;
            }
        }
        inv_scale_k /= scale;
    }
    raw
}
