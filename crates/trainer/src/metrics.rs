//! Evaluation helpers for trained classifiers

/// Fraction of positions where predicted and actual labels agree
pub fn accuracy(predicted: &[u8], actual: &[u8]) -> f64 {
    assert_eq!(predicted.len(), actual.len());
    if predicted.is_empty() {
        return 0.0;
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    correct as f64 / predicted.len() as f64
}
