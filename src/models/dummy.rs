//! Baseline regressor that ignores `x`.

use crate::math::mean;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DummyFit {
    pub mean: f64,
}

impl DummyFit {
    pub fn fit(ys: &[f64]) -> Self {
        Self { mean: mean(ys) }
    }

    pub fn predict(&self, _x: f64) -> f64 {
        self.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_the_target_mean_everywhere() {
        let fit = DummyFit::fit(&[1.0, 2.0, 6.0]);
        assert_eq!(fit.mean, 3.0);
        assert_eq!(fit.predict(-100.0), 3.0);
        assert_eq!(fit.predict(7.5), 3.0);
    }
}
