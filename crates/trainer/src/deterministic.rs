//! Deterministic utilities for reproducible training
//!
//! Provides an LCG-based RNG, deterministic shuffling, the stratified
//! train/test split, and tie-breaking logic so that identical inputs and
//! seeds produce identical models across platforms and runs.

use std::num::Wrapping;

/// Linear Congruential Generator for deterministic pseudo-randomness
/// Uses constants from Numerical Recipes (glibc)
#[derive(Clone, Debug)]
pub struct LcgRng {
    state: Wrapping<i64>,
}

impl LcgRng {
    // LCG constants (compatible with glibc)
    const MULTIPLIER: i64 = 1103515245;
    const INCREMENT: i64 = 12345;
    const MODULUS: i64 = 1 << 31;

    pub fn new(seed: i64) -> Self {
        Self {
            state: Wrapping(seed.abs() % Self::MODULUS),
        }
    }

    /// Generate next random i64 in range [0, MODULUS)
    pub fn next_i64(&mut self) -> i64 {
        self.state = self.state * Wrapping(Self::MULTIPLIER) + Wrapping(Self::INCREMENT);
        (self.state.0 & (Self::MODULUS - 1)).abs()
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: i64) -> i64 {
        if max <= 0 {
            return 0;
        }
        self.next_i64() % max
    }
}

/// Deterministic in-place Fisher-Yates shuffle of `0..n`
pub fn shuffled_indices(n: usize, rng: &mut LcgRng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.next_range((i + 1) as i64) as usize;
        indices.swap(i, j);
    }
    indices
}

/// Stratified train/test split on the label with a fixed seed.
///
/// Each class's row indices are shuffled deterministically and split at
/// `test_fraction`, so label prevalence is preserved on both sides.
/// Returns `(train_indices, test_indices)`.
pub fn stratified_split(
    labels: &[u8],
    test_fraction: f64,
    seed: i64,
) -> (Vec<usize>, Vec<usize>) {
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0u8, 1u8] {
        let members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();

        if members.is_empty() {
            continue;
        }

        let mut rng = LcgRng::new(seed.wrapping_add(i64::from(class) + 1));
        let order = shuffled_indices(members.len(), &mut rng);

        let test_count = ((members.len() as f64) * test_fraction).round() as usize;
        let test_count = test_count.min(members.len());

        for (rank, &pos) in order.iter().enumerate() {
            if rank < test_count {
                test.push(members[pos]);
            } else {
                train.push(members[pos]);
            }
        }
    }

    (train, test)
}

/// Deterministic tie-breaker for split selection
///
/// Orders candidates by (feature, threshold bit pattern, node id) so that
/// equal-gain splits resolve the same way on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SplitTieBreaker {
    pub feature: usize,
    pub threshold_bits: u64,
    pub node_id: usize,
}

impl SplitTieBreaker {
    pub fn new(feature: usize, threshold: f64, node_id: usize) -> Self {
        Self {
            feature,
            threshold_bits: threshold.to_bits(),
            node_id,
        }
    }
}
