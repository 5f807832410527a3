//! Regression Tree - one boosting round
//!
//! Nodes are stored flat; index 0 is the root. Rows with
//! `x[feature] < threshold` go left.

use serde::{Deserialize, Serialize};

use super::params::BoosterParams;
use crate::features::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Margin contribution for one row
    pub fn predict(&self, row: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split { feature, threshold, left, right } => {
                    index = if row[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Add this tree's split counts per feature into `counts`
    pub fn accumulate_splits(&self, counts: &mut [usize; FEATURE_COUNT]) {
        for node in &self.nodes {
            if let Node::Split { feature, .. } = node {
                counts[*feature] += 1;
            }
        }
    }

    /// Structural check for trees read from disk: every child index must
    /// point forward inside the node list, so traversal always terminates.
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if let Node::Split { feature, threshold, left, right } = node {
                if *feature >= FEATURE_COUNT {
                    return Err(format!("node {} splits on unknown feature {}", index, feature));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", index));
                }
                for child in [left, right] {
                    if *child <= index || *child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", index, child));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Grows one tree from per-row gradients and hessians
pub(crate) struct TreeBuilder<'a> {
    pub features: &'a [FeatureVector],
    pub grad: &'a [f64],
    pub hess: &'a [f64],
    pub columns: &'a [usize],
    pub params: &'a BoosterParams,
}

impl<'a> TreeBuilder<'a> {
    pub fn build(&self, rows: &[usize]) -> RegressionTree {
        let mut nodes = Vec::new();
        self.grow(&mut nodes, rows, 0);
        RegressionTree { nodes }
    }

    fn grow(&self, nodes: &mut Vec<Node>, rows: &[usize], depth: usize) -> usize {
        let (g, h) = self.sums(rows);
        let index = nodes.len();
        nodes.push(Node::Leaf {
            value: self.leaf_weight(g, h),
        });

        if depth >= self.params.max_depth || rows.len() < 2 {
            return index;
        }

        let Some(split) = self.best_split(rows, g, h) else {
            return index;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&r| self.features[r][split.feature] < split.threshold);

        let left = self.grow(nodes, &left_rows, depth + 1);
        let right = self.grow(nodes, &right_rows, depth + 1);

        nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn sums(&self, rows: &[usize]) -> (f64, f64) {
        rows.iter()
            .fold((0.0, 0.0), |(g, h), &r| (g + self.grad[r], h + self.hess[r]))
    }

    fn leaf_weight(&self, g: f64, h: f64) -> f64 {
        -g / (h + self.params.reg_lambda) * self.params.learning_rate
    }

    fn score(&self, g: f64, h: f64) -> f64 {
        g * g / (h + self.params.reg_lambda)
    }

    fn best_split(&self, rows: &[usize], g: f64, h: f64) -> Option<SplitCandidate> {
        let parent = self.score(g, h);
        let min_child = self.params.min_child_weight;
        let mut best: Option<SplitCandidate> = None;
        let mut sorted = rows.to_vec();

        for &feature in self.columns {
            sorted.sort_by(|&a, &b| self.features[a][feature].total_cmp(&self.features[b][feature]));

            let (mut gl, mut hl) = (0.0, 0.0);
            for pair in sorted.windows(2) {
                let (row, next_row) = (pair[0], pair[1]);
                gl += self.grad[row];
                hl += self.hess[row];

                let value = self.features[row][feature];
                let next = self.features[next_row][feature];
                if value == next {
                    continue;
                }

                let (gr, hr) = (g - gl, h - hl);
                if hl < min_child || hr < min_child {
                    continue;
                }

                let gain = 0.5 * (self.score(gl, hl) + self.score(gr, hr) - parent) - self.params.gamma;
                // `x < next` keeps every row up to `value` on the left,
                // even when the two values are adjacent floats
                if gain > best.map_or(0.0, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: next,
                        gain,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump_params() -> BoosterParams {
        BoosterParams {
            max_depth: 1,
            learning_rate: 1.0,
            min_child_weight: 0.0,
            reg_lambda: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_stump_separates_on_informative_feature() {
        // Feature 1 separates labels; feature 0 is noise
        let features: Vec<FeatureVector> = vec![
            [3.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 2.0, 0.0, 0.0, 0.0, 0.0],
            [2.0, 8.0, 0.0, 0.0, 0.0, 0.0],
            [3.0, 9.0, 0.0, 0.0, 0.0, 0.0],
        ];
        // Gradients at p = 0.5 for labels [0, 0, 1, 1]
        let grad = vec![0.5, 0.5, -0.5, -0.5];
        let hess = vec![0.25; 4];
        let columns: Vec<usize> = (0..FEATURE_COUNT).collect();
        let params = stump_params();

        let tree = TreeBuilder {
            features: &features,
            grad: &grad,
            hess: &hess,
            columns: &columns,
            params: &params,
        }
        .build(&[0, 1, 2, 3]);

        match &tree.nodes()[0] {
            Node::Split { feature, threshold, .. } => {
                assert_eq!(*feature, 1);
                assert_eq!(*threshold, 8.0);
            }
            other => panic!("expected split, got {:?}", other),
        }
        assert!(tree.predict(&features[0]) < 0.0);
        assert!(tree.predict(&features[3]) > 0.0);
        assert!(tree.validate().is_ok());

        let mut counts = [0; FEATURE_COUNT];
        tree.accumulate_splits(&mut counts);
        assert_eq!(counts, [0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_min_child_weight_blocks_split() {
        let features: Vec<FeatureVector> = vec![[0.0; 6], [1.0; 6]];
        let grad = vec![0.5, -0.5];
        let hess = vec![0.25; 2];
        let columns: Vec<usize> = (0..FEATURE_COUNT).collect();
        let params = BoosterParams {
            min_child_weight: 1.0,
            ..stump_params()
        };

        let tree = TreeBuilder {
            features: &features,
            grad: &grad,
            hess: &hess,
            columns: &columns,
            params: &params,
        }
        .build(&[0, 1]);

        assert_eq!(tree.nodes().len(), 1);
        assert!(matches!(tree.nodes()[0], Node::Leaf { .. }));
    }

    #[test]
    fn test_split_between_adjacent_floats_keeps_both_children() {
        let lo = 1.0_f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let features: Vec<FeatureVector> = vec![
            [lo, 0.0, 0.0, 0.0, 0.0, 0.0],
            [lo, 0.0, 0.0, 0.0, 0.0, 0.0],
            [hi, 0.0, 0.0, 0.0, 0.0, 0.0],
            [hi, 0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        let grad = vec![0.5, 0.5, -0.5, -0.5];
        let hess = vec![0.25; 4];
        let columns = vec![0];
        let params = stump_params();

        let tree = TreeBuilder {
            features: &features,
            grad: &grad,
            hess: &hess,
            columns: &columns,
            params: &params,
        }
        .build(&[0, 1, 2, 3]);

        match &tree.nodes()[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, hi),
            other => panic!("expected split, got {:?}", other),
        }
        // No empty child: both leaves are finite and point opposite ways
        assert_eq!(tree.predict(&features[0]), -2.0);
        assert_eq!(tree.predict(&features[2]), 2.0);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = RegressionTree {
            nodes: vec![
                Node::Split { feature: 0, threshold: 1.0, left: 0, right: 1 },
                Node::Leaf { value: 0.0 },
            ],
        };
        assert!(tree.validate().is_err());
    }
}
