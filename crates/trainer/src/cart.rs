//! Exact-greedy classification tree builder
//!
//! Builds a single Gini-impurity decision tree over a (possibly
//! bootstrapped) index set. Candidate thresholds are midpoints between
//! consecutive distinct sorted values; equal-gain candidates resolve
//! through a deterministic tie-breaker so tree construction is fully
//! reproducible.

use std::cmp::Ordering;

use cardiolens_model::tree::{Node, Tree};

use crate::deterministic::{LcgRng, SplitTieBreaker};

/// Construction parameters for a single tree
#[derive(Clone, Debug)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Number of features considered per split; `None` considers all
    pub feature_subsample: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 12,
            min_samples_leaf: 10,
            feature_subsample: None,
        }
    }
}

/// Split candidate with gain and tie-breaker
#[derive(Debug, Clone)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
    tie_breaker: SplitTieBreaker,
}

impl SplitCandidate {
    fn new(feature: usize, threshold: f64, gain: f64, node_id: usize) -> Self {
        Self {
            feature,
            threshold,
            gain,
            tie_breaker: SplitTieBreaker::new(feature, threshold, node_id),
        }
    }
}

/// Gini impurity of a binary node: 2p(1-p)
fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

/// Build a classification tree using the exact-greedy CART algorithm
pub struct CartBuilder<'a> {
    config: TreeConfig,
    features: &'a [Vec<f64>],
    labels: &'a [u8],
    n_features: usize,
    n_root: usize,
    importance: Vec<f64>,
}

impl<'a> CartBuilder<'a> {
    pub fn new(features: &'a [Vec<f64>], labels: &'a [u8], config: TreeConfig) -> Self {
        assert_eq!(features.len(), labels.len());

        let n_features = features.first().map_or(0, |row| row.len());

        Self {
            config,
            features,
            labels,
            n_features,
            n_root: 0,
            importance: vec![0.0; n_features],
        }
    }

    /// Build a tree over the given row indices (duplicates allowed, as
    /// produced by bootstrap sampling). Returns the tree and the raw
    /// impurity-decrease accumulation per feature.
    pub fn build(mut self, indices: &[usize], rng: &mut LcgRng) -> (Tree, Vec<f64>) {
        let mut nodes = Vec::new();

        if indices.is_empty() {
            nodes.push(Node::leaf(0.0));
            return (Tree::new(nodes), self.importance);
        }

        self.n_root = indices.len();
        self.build_node(indices, 0, &mut nodes, 0, rng);

        (Tree::new(nodes), self.importance)
    }

    fn build_node(
        &mut self,
        indices: &[usize],
        depth: usize,
        nodes: &mut Vec<Node>,
        node_id: usize,
        rng: &mut LcgRng,
    ) -> usize {
        let current = nodes.len();

        let positives = indices.iter().filter(|&&i| self.labels[i] == 1).count();
        let fraction = positives as f64 / indices.len() as f64;

        // Stopping conditions: depth bound, sample bound, or a pure node
        if depth >= self.config.max_depth
            || indices.len() < 2 * self.config.min_samples_leaf
            || positives == 0
            || positives == indices.len()
        {
            nodes.push(Node::leaf(fraction));
            return current;
        }

        let split = match self.find_best_split(indices, node_id, rng) {
            Some(s) => s,
            None => {
                nodes.push(Node::leaf(fraction));
                return current;
            }
        };

        let (left_indices, right_indices) =
            self.partition(indices, split.feature, split.threshold);

        if left_indices.len() < self.config.min_samples_leaf
            || right_indices.len() < self.config.min_samples_leaf
        {
            nodes.push(Node::leaf(fraction));
            return current;
        }

        // Mean-decrease-in-impurity contribution, weighted by node share
        self.importance[split.feature] +=
            (indices.len() as f64 / self.n_root as f64) * split.gain;

        // Reserve the current slot, then attach children
        nodes.push(Node::internal(split.feature, split.threshold, 0, 0));

        let left_idx = self.build_node(&left_indices, depth + 1, nodes, node_id * 2 + 1, rng);
        let right_idx = self.build_node(&right_indices, depth + 1, nodes, node_id * 2 + 2, rng);

        nodes[current].left = left_idx;
        nodes[current].right = right_idx;

        current
    }

    /// Features considered at this split
    fn candidate_features(&self, rng: &mut LcgRng) -> Vec<usize> {
        match self.config.feature_subsample {
            Some(k) if k < self.n_features => sample_features(self.n_features, k, rng),
            _ => (0..self.n_features).collect(),
        }
    }

    fn find_best_split(
        &self,
        indices: &[usize],
        node_id: usize,
        rng: &mut LcgRng,
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let total_pos = indices.iter().filter(|&&i| self.labels[i] == 1).count();
        let parent_impurity = gini(total_pos, n);

        let mut best: Option<SplitCandidate> = None;

        for feature in self.candidate_features(rng) {
            let mut pairs: Vec<(f64, u8)> = indices
                .iter()
                .map(|&i| (self.features[i][feature], self.labels[i]))
                .collect();
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut left_n = 0usize;
            let mut left_pos = 0usize;

            for i in 0..n - 1 {
                left_n += 1;
                if pairs[i].1 == 1 {
                    left_pos += 1;
                }

                // Only boundaries between distinct values are candidates
                if pairs[i].0 == pairs[i + 1].0 {
                    continue;
                }

                let right_n = n - left_n;
                if left_n < self.config.min_samples_leaf
                    || right_n < self.config.min_samples_leaf
                {
                    continue;
                }

                let right_pos = total_pos - left_pos;
                let gain = parent_impurity
                    - (left_n as f64 / n as f64) * gini(left_pos, left_n)
                    - (right_n as f64 / n as f64) * gini(right_pos, right_n);

                if gain <= 0.0 {
                    continue;
                }

                let threshold = (pairs[i].0 + pairs[i + 1].0) / 2.0;
                let candidate = SplitCandidate::new(feature, threshold, gain, node_id);

                best = match best {
                    None => Some(candidate),
                    Some(current) => {
                        if candidate.gain > current.gain
                            || (candidate.gain == current.gain
                                && candidate.tie_breaker < current.tie_breaker)
                        {
                            Some(candidate)
                        } else {
                            Some(current)
                        }
                    }
                };
            }
        }

        best
    }

    fn partition(
        &self,
        indices: &[usize],
        feature: usize,
        threshold: f64,
    ) -> (Vec<usize>, Vec<usize>) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for &idx in indices {
            if self.features[idx][feature] <= threshold {
                left.push(idx);
            } else {
                right.push(idx);
            }
        }

        (left, right)
    }
}

/// Choose `k` distinct features out of `m`, sorted ascending for
/// deterministic iteration order
fn sample_features(m: usize, k: usize, rng: &mut LcgRng) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..m).collect();
    for i in 0..k {
        let j = i + rng.next_range((m - i) as i64) as usize;
        pool.swap(i, j);
    }
    let mut chosen = pool[..k].to_vec();
    chosen.sort_unstable();
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let features = vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
            vec![10.0, 15.0],
            vec![11.0, 25.0],
            vec![12.0, 35.0],
            vec![13.0, 45.0],
        ];
        let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
        (features, labels)
    }

    #[test]
    fn test_separable_split() {
        let (features, labels) = separable_data();
        let config = TreeConfig {
            max_depth: 3,
            min_samples_leaf: 1,
            feature_subsample: None,
        };

        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = LcgRng::new(42);
        let builder = CartBuilder::new(&features, &labels, config);
        let (tree, importance) = builder.build(&indices, &mut rng);

        assert!(tree.validate().is_ok());
        // The root must split on feature 0, which perfectly separates
        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.feature, 0);

        // Perfect separation: leaves predict 0.0 and 1.0
        assert_eq!(tree.evaluate(&[2.0, 0.0]), 0.0);
        assert_eq!(tree.evaluate(&[12.0, 0.0]), 1.0);

        // All importance mass lands on feature 0
        assert!(importance[0] > 0.0);
        assert_eq!(importance[1], 0.0);
    }

    #[test]
    fn test_leaf_only_on_pure_node() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec![1, 1, 1];

        let config = TreeConfig {
            max_depth: 5,
            min_samples_leaf: 1,
            feature_subsample: None,
        };
        let indices: Vec<usize> = (0..3).collect();
        let mut rng = LcgRng::new(42);
        let (tree, _) = CartBuilder::new(&features, &labels, config).build(&indices, &mut rng);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].leaf_value(), Some(1.0));
    }

    #[test]
    fn test_min_samples_leaf_respected() {
        let (features, labels) = separable_data();
        let config = TreeConfig {
            max_depth: 10,
            // 2 * min_samples_leaf > 8, so the root cannot split
            min_samples_leaf: 5,
            feature_subsample: None,
        };

        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = LcgRng::new(42);
        let (tree, _) = CartBuilder::new(&features, &labels, config).build(&indices, &mut rng);

        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.nodes[0].is_leaf());
    }

    #[test]
    fn test_build_determinism() {
        let (features, labels) = separable_data();
        let config = TreeConfig {
            max_depth: 4,
            min_samples_leaf: 1,
            feature_subsample: Some(1),
        };
        let indices: Vec<usize> = (0..features.len()).collect();

        let mut rng1 = LcgRng::new(42);
        let (tree1, imp1) =
            CartBuilder::new(&features, &labels, config.clone()).build(&indices, &mut rng1);

        let mut rng2 = LcgRng::new(42);
        let (tree2, imp2) =
            CartBuilder::new(&features, &labels, config).build(&indices, &mut rng2);

        assert_eq!(tree1, tree2);
        assert_eq!(imp1, imp2);
    }

    #[test]
    fn test_empty_indices_yield_leaf() {
        let (features, labels) = separable_data();
        let config = TreeConfig::default();
        let mut rng = LcgRng::new(42);
        let (tree, _) = CartBuilder::new(&features, &labels, config).build(&[], &mut rng);

        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.nodes[0].is_leaf());
    }

    #[test]
    fn test_sample_features_distinct_and_sorted() {
        let mut rng = LcgRng::new(9);
        let chosen = sample_features(12, 3, &mut rng);

        assert_eq!(chosen.len(), 3);
        assert!(chosen.windows(2).all(|w| w[0] < w[1]));
        assert!(chosen.iter().all(|&f| f < 12));
    }
}
