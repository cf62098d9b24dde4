//! Ordinary least squares line `y = slope * x + intercept`.

use crate::error::FitError;
use crate::math::mean;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Closed-form OLS: `slope = cov(x, y) / var(x)`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, FitError> {
        let x_bar = mean(xs);
        let y_bar = mean(ys);

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - x_bar;
            sxx += dx * dx;
            sxy += dx * (y - y_bar);
        }

        if !(sxx.is_finite() && sxx > 0.0) {
            return Err(FitError::degenerate(
                "variance of x is zero; a line cannot be fitted against a single x-value",
            ));
        }

        let slope = sxy / sxx;
        let intercept = y_bar - slope * x_bar;
        if !(slope.is_finite() && intercept.is_finite()) {
            return Err(FitError::degenerate("linear fit produced non-finite parameters"));
        }

        Ok(Self { slope, intercept })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let xs = [-3.0, 0.0, 1.5, 4.0, 10.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.predict(2.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn least_squares_through_noisy_points() {
        // Symmetric residuals around y = x.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 0.0, 3.0, 2.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 0.6).abs() < 1e-12);
        assert!((fit.intercept - 0.6).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_is_degenerate() {
        let err = LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, FitError::Degenerate(_)));
    }
}
