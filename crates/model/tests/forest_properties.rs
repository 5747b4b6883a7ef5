//! Property tests over forest inference

use cardiolens_model::{Forest, ForestMetadata, Node, Tree};
use proptest::prelude::*;

fn fixture_forest() -> Forest {
    let tree1 = Tree::new(vec![
        Node::internal(0, 50.0, 1, 2),
        Node::leaf(0.15),
        Node::leaf(0.85),
    ]);
    let tree2 = Tree::new(vec![
        Node::internal(1, 0.0, 1, 2),
        Node::leaf(0.4),
        Node::leaf(0.6),
    ]);
    let tree3 = Tree::new(vec![
        Node::internal(2, 100.0, 1, 2),
        Node::internal(0, -10.0, 3, 4),
        Node::leaf(1.0),
        Node::leaf(0.0),
        Node::leaf(0.5),
    ]);

    Forest {
        schema: vec!["a".into(), "b".into(), "c".into()],
        trees: vec![tree1, tree2, tree3],
        feature_importances: vec![0.5, 0.25, 0.25],
        metadata: ForestMetadata {
            version: "test".into(),
            trained_at: 0,
            tree_count: 3,
            max_depth: 2,
            feature_count: 3,
            holdout_accuracy: 0.0,
        },
    }
}

proptest! {
    #[test]
    fn probability_stays_in_unit_interval(
        a in -1000.0..1000.0f64,
        b in -1000.0..1000.0f64,
        c in -1000.0..1000.0f64,
    ) {
        let forest = fixture_forest();
        let p = forest.predict_proba(&[a, b, c]);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn inference_is_deterministic(
        a in -1000.0..1000.0f64,
        b in -1000.0..1000.0f64,
        c in -1000.0..1000.0f64,
    ) {
        let forest = fixture_forest();
        let first = forest.predict_proba(&[a, b, c]);
        let second = forest.predict_proba(&[a, b, c]);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}
