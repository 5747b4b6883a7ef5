//! Decision tree structures for forest inference
//!
//! Nodes are stored in a flat vector; node 0 is the root. Internal nodes
//! carry a feature index and a split threshold, leaves carry the
//! positive-class fraction observed at fit time.

use serde::{Deserialize, Serialize};

/// A decision tree node (internal or leaf)
///
/// For internal nodes `leaf` is `None` and `left`/`right` index into the
/// owning tree's node vector. For leaf nodes `leaf` holds the predicted
/// positive-class fraction and the child indices are unused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Feature index to split on
    pub feature: usize,

    /// Threshold value for the split; samples with value <= threshold go left
    pub threshold: f64,

    /// Left child index
    pub left: usize,

    /// Right child index
    pub right: usize,

    /// Leaf value (Some for leaf nodes, None for internal nodes)
    pub leaf: Option<f64>,
}

impl Node {
    /// Create a new internal (split) node
    pub fn internal(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self {
            feature,
            threshold,
            left,
            right,
            leaf: None,
        }
    }

    /// Create a new leaf node holding the positive-class fraction
    pub fn leaf(value: f64) -> Self {
        Self {
            feature: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
            leaf: Some(value),
        }
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Get the leaf value if this is a leaf node
    pub fn leaf_value(&self) -> Option<f64> {
        self.leaf
    }
}

/// A single decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    /// Tree nodes (node 0 is the root)
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree with the given nodes
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Evaluate this tree on a feature vector
    ///
    /// Traversal is deterministic: the comparison is `<=` at every split,
    /// so identical inputs always reach the same leaf. Structural defects
    /// (out-of-range indices) evaluate to 0.0 rather than panicking.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }

        let mut idx = 0usize;

        loop {
            if idx >= self.nodes.len() {
                return 0.0;
            }

            let node = &self.nodes[idx];

            if let Some(value) = node.leaf {
                return value;
            }

            if node.feature >= features.len() {
                return 0.0;
            }

            idx = if features[node.feature] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }

    /// Get the root node
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Validate tree structure
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("Tree has no nodes".to_string());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                let value = node.leaf.unwrap_or(0.0);
                if !(0.0..=1.0).contains(&value) {
                    return Err(format!("Leaf node {i} value {value} outside [0, 1]"));
                }
            } else {
                if node.left >= self.nodes.len() {
                    return Err(format!("Node {} has invalid left child: {}", i, node.left));
                }
                if node.right >= self.nodes.len() {
                    return Err(format!("Node {} has invalid right child: {}", i, node.right));
                }
                if node.left == i || node.right == i {
                    return Err(format!("Node {i} references itself"));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let internal = Node::internal(3, 123.5, 1, 2);
        assert_eq!(internal.feature, 3);
        assert_eq!(internal.threshold, 123.5);
        assert_eq!(internal.left, 1);
        assert_eq!(internal.right, 2);
        assert!(!internal.is_leaf());

        let leaf = Node::leaf(0.25);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.leaf_value(), Some(0.25));
    }

    #[test]
    fn test_tree_evaluation() {
        // if feature[0] <= 50, return 0.1, else return 0.9
        let tree = Tree::new(vec![
            Node::internal(0, 50.0, 1, 2),
            Node::leaf(0.1),
            Node::leaf(0.9),
        ]);

        assert_eq!(tree.evaluate(&[30.0]), 0.1);
        assert_eq!(tree.evaluate(&[50.0]), 0.1); // equal goes left
        assert_eq!(tree.evaluate(&[60.0]), 0.9);
    }

    #[test]
    fn test_tree_validation() {
        let valid = Tree::new(vec![
            Node::internal(0, 50.0, 1, 2),
            Node::leaf(0.1),
            Node::leaf(0.9),
        ]);
        assert!(valid.validate().is_ok());

        // left child out of bounds
        let invalid = Tree::new(vec![
            Node::internal(0, 50.0, 5, 2),
            Node::leaf(0.1),
            Node::leaf(0.9),
        ]);
        assert!(invalid.validate().is_err());

        // leaf outside the probability range
        let bad_leaf = Tree::new(vec![Node::leaf(1.5)]);
        assert!(bad_leaf.validate().is_err());
    }

    #[test]
    fn test_deterministic_traversal() {
        let tree = Tree::new(vec![
            Node::internal(0, 50.0, 1, 2),
            Node::leaf(0.2),
            Node::leaf(0.8),
        ]);

        let features = vec![30.0, 40.0, 50.0];

        let result1 = tree.evaluate(&features);
        let result2 = tree.evaluate(&features);
        let result3 = tree.evaluate(&features);

        assert_eq!(result1, result2);
        assert_eq!(result2, result3);
    }
}
