//! Binary CART regression tree over the single feature `x`.
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and refer to their children by
//! index. Traversal is strictly top-down, so there are no parent links.
//!
//! Splitting:
//! - candidate thresholds are midpoints between consecutive distinct sorted x
//! - the chosen threshold minimizes the summed squared deviation of the two
//!   children (the CART variance-reduction criterion)
//! - ties go to the smallest threshold
//!
//! Because points are sorted by x once up front and every split sends
//! `x <= threshold` left, each node owns a contiguous run of the sorted
//! points. Child impurities for all candidates come from one prefix and one
//! suffix Welford pass, so a node costs O(n).

use crate::error::FitError;
use crate::math::mean;

/// Gains not above this fraction of the parent impurity are treated as no
/// improvement. The same fraction bounds what counts as a tie between splits.
const MIN_GAIN_RTOL: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Split {
        threshold: f64,
        left: usize,
        right: usize,
        n_samples: usize,
    },
    Leaf {
        value: f64,
        n_samples: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn fit(xs: &[f64], ys: &[f64], max_depth: usize) -> Result<Self, FitError> {
        if max_depth == 0 {
            return Err(FitError::degenerate("tree depth must be at least 1"));
        }
        if xs.is_empty() || xs.len() != ys.len() {
            return Err(FitError::degenerate("tree needs paired, non-empty x/y values"));
        }

        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        // Stable: equal x keep input order, which keeps leaf means bit-identical
        // across calls.
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut nodes = Vec::new();
        build_node(&pairs, 0, max_depth, &mut nodes);
        Ok(Self { nodes })
    }

    /// Walk from the root: `x <= threshold` goes left, otherwise right.
    pub fn predict(&self, x: f64) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if x <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    /// Split thresholds in arena (pre-order) order.
    pub fn thresholds(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                TreeNode::Split { threshold, .. } => Some(*threshold),
                TreeNode::Leaf { .. } => None,
            })
            .collect()
    }

    /// Depth of the deepest leaf (root alone is depth 0).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match &nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Grow the subtree for `pairs` (sorted by x) and return its arena index.
fn build_node(
    pairs: &[(f64, f64)],
    depth: usize,
    max_depth: usize,
    nodes: &mut Vec<TreeNode>,
) -> usize {
    let n_samples = pairs.len();
    let same_x = match (pairs.first(), pairs.last()) {
        (Some(first), Some(last)) => first.0 == last.0,
        _ => true,
    };

    let split = if depth >= max_depth || n_samples < 2 || same_x {
        None
    } else {
        best_split(pairs)
    };

    let Some(split) = split else {
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let idx = nodes.len();
        nodes.push(TreeNode::Leaf {
            value: mean(&ys),
            n_samples,
        });
        return idx;
    };

    let node_idx = nodes.len();
    // Placeholder until both children have indices.
    nodes.push(TreeNode::Leaf {
        value: 0.0,
        n_samples: 0,
    });

    let (lhs, rhs) = pairs.split_at(split.left_len);
    let left = build_node(lhs, depth + 1, max_depth, nodes);
    let right = build_node(rhs, depth + 1, max_depth, nodes);

    nodes[node_idx] = TreeNode::Split {
        threshold: split.threshold,
        left,
        right,
        n_samples,
    };
    node_idx
}

#[derive(Debug, Clone, Copy)]
struct Split {
    /// Number of sorted points that go left.
    left_len: usize,
    threshold: f64,
}

/// Best variance-reducing split of `pairs`, if any split improves on the parent.
fn best_split(pairs: &[(f64, f64)]) -> Option<Split> {
    let n = pairs.len();
    let prefix = running_sq_dev(pairs.iter().map(|p| p.1));
    let mut suffix = running_sq_dev(pairs.iter().rev().map(|p| p.1));
    suffix.reverse();

    let parent = prefix[n];
    // Forward and reversed passes round differently, so sums that tie exactly
    // can differ by a few ULP. Anything within this margin counts as a tie.
    let tie_margin = MIN_GAIN_RTOL * parent;
    let mut best: Option<(Split, f64)> = None;

    for k in 1..n {
        let (a, b) = (pairs[k - 1].0, pairs[k].0);
        if a == b {
            continue;
        }
        let weighted = prefix[k] + suffix[k];
        let improves = match best {
            None => true,
            // Earlier (smaller) thresholds win ties.
            Some((_, best_weighted)) => weighted < best_weighted - tie_margin,
        };
        if improves {
            best = Some((
                Split {
                    left_len: k,
                    threshold: midpoint(a, b),
                },
                weighted,
            ));
        }
    }

    let (split, weighted) = best?;
    let gain = parent - weighted;
    if gain > MIN_GAIN_RTOL * parent && gain > 0.0 {
        Some(split)
    } else {
        None
    }
}

/// `out[k]` is the sum of squared deviations of the first `k` values.
///
/// Welford's update keeps this stable where `Σy² - (Σy)²/n` would cancel.
fn running_sq_dev(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out = vec![0.0];
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, y) in values.enumerate() {
        let delta = y - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (y - mean);
        out.push(m2);
    }
    out
}

/// Midpoint of `a < b` that is guaranteed to send `a` left and `b` right.
fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a / 2.0 + b / 2.0;
    if mid >= b || mid < a { a } else { mid }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(points: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
        points.iter().copied().unzip()
    }

    #[test]
    fn depth_one_splits_symmetric_points_at_zero() {
        let (xs, ys) = xy(&[(-5.0, -5.0), (-1.0, -1.0), (1.0, 1.0), (5.0, 5.0)]);
        let tree = RegressionTree::fit(&xs, &ys, 1).unwrap();

        assert_eq!(tree.thresholds(), vec![0.0]);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.predict(-2.0), -3.0);
        assert_eq!(tree.predict(2.0), 3.0);
        // x == threshold goes left.
        assert_eq!(tree.predict(0.0), -3.0);
    }

    #[test]
    fn ties_choose_smallest_threshold() {
        // Splitting at 0.5 and at 1.5 both leave a weighted impurity of 0.5.
        let (xs, ys) = xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let tree = RegressionTree::fit(&xs, &ys, 1).unwrap();
        assert_eq!(tree.thresholds(), vec![0.5]);
    }

    #[test]
    fn near_ties_from_rounding_choose_smallest_threshold() {
        // Both splits leave 0.005 exactly; the two float sums differ in the last bits.
        let (xs, ys) = xy(&[(0.0, 0.0), (1.0, 0.1), (2.0, 0.2)]);
        let tree = RegressionTree::fit(&xs, &ys, 1).unwrap();
        assert_eq!(tree.thresholds(), vec![0.5]);

        for base in [0.1, 0.3, 1.7, 12.4] {
            for step in [0.1, 0.2, 0.7] {
                let ys = [base, base + step, base + 2.0 * step];
                let tree = RegressionTree::fit(&[0.0, 1.0, 2.0], &ys, 1).unwrap();
                assert_eq!(tree.thresholds(), vec![0.5], "ys={ys:?}");

                let rev = [ys[2], ys[1], ys[0]];
                let tree = RegressionTree::fit(&[0.0, 1.0, 2.0], &rev, 1).unwrap();
                assert_eq!(tree.thresholds(), vec![0.5], "ys={rev:?}");
            }
        }
    }

    #[test]
    fn constant_targets_stay_a_single_leaf() {
        let (xs, ys) = xy(&[(0.0, 2.0), (1.0, 2.0), (3.0, 2.0)]);
        let tree = RegressionTree::fit(&xs, &ys, 4).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.predict(100.0), 2.0);
    }

    #[test]
    fn depth_limit_is_respected() {
        let xs: Vec<f64> = (0..32).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        for max_depth in 1..=4 {
            let tree = RegressionTree::fit(&xs, &ys, max_depth).unwrap();
            assert_eq!(tree.depth(), max_depth);
            assert!(tree.leaf_count() <= 1 << max_depth);
        }
    }

    #[test]
    fn deep_tree_interpolates_distinct_points() {
        let (xs, ys) = xy(&[(0.0, 3.0), (1.0, -1.0), (2.0, 4.0), (3.0, 0.5)]);
        let tree = RegressionTree::fit(&xs, &ys, 3).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert_eq!(tree.predict(*x), *y);
        }
    }

    #[test]
    fn repeated_x_never_separated() {
        let (xs, ys) = xy(&[(1.0, 0.0), (2.0, 5.0), (1.0, 2.0)]);
        let tree = RegressionTree::fit(&xs, &ys, 3).unwrap();
        assert_eq!(tree.thresholds(), vec![1.5]);
        assert_eq!(tree.predict(1.0), 1.0);
        assert_eq!(tree.predict(2.0), 5.0);
    }

    #[test]
    fn midpoint_stays_between_adjacent_floats() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        let t = midpoint(a, b);
        assert!(a <= t && t < b);
    }
}
