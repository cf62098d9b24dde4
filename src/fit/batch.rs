//! Fit several model kinds over the same points.
//!
//! Fits are independent, so they run in parallel; results come back in the
//! order the kinds were requested, and the first failure in that order wins.

use rayon::prelude::*;

use crate::domain::{FitRequest, FitResult, Point, RegressionType};
use crate::error::FitError;
use crate::fit::fit;

/// One model's result within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFit {
    pub kind: RegressionType,
    pub result: FitResult,
}

/// Fit every kind in `kinds` on `points`.
pub fn fit_many(
    points: &[Point],
    kinds: &[RegressionType],
    polynomial_degree: i64,
    tree_max_depth: i64,
) -> Result<Vec<BatchFit>, FitError> {
    let outcomes: Vec<Result<BatchFit, FitError>> = kinds
        .par_iter()
        .map(|&kind| {
            let req = FitRequest {
                points: points.to_vec(),
                regression_type: kind,
                polynomial_degree,
                tree_max_depth,
            };
            fit(&req).map(|result| BatchFit { kind, result })
        })
        .collect();

    outcomes.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        [(0.0, 1.0), (1.0, 3.0), (2.0, 2.0), (3.0, 5.0), (4.0, 4.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect()
    }

    #[test]
    fn results_follow_request_order() {
        let kinds = [
            RegressionType::Dummy,
            RegressionType::Tree,
            RegressionType::Linear,
            RegressionType::Polynomial,
        ];
        let fits = fit_many(&points(), &kinds, 2, 2).unwrap();
        let got: Vec<RegressionType> = fits.iter().map(|f| f.kind).collect();
        assert_eq!(got, kinds);
    }

    #[test]
    fn batch_matches_single_fits() {
        let fits = fit_many(&points(), &RegressionType::ALL, 3, 2).unwrap();
        for f in fits {
            let single = fit(&FitRequest::new(points(), f.kind).with_degree(3).with_depth(2)).unwrap();
            assert_eq!(f.result, single);
        }
    }

    #[test]
    fn first_failure_in_request_order_is_reported() {
        // Degree 9 is invalid on five points; depth 0 is invalid for trees.
        let kinds = [RegressionType::Linear, RegressionType::Polynomial, RegressionType::Tree];
        let err = fit_many(&points(), &kinds, 9, 0).unwrap_err();
        assert!(err.message().contains("polynomial_degree"));
    }
}
