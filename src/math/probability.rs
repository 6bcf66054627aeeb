use rand::{Rng, SeedableRng, rngs::StdRng};

/// Weighted Shannon entropy in bits
///
/// Weights are normalized to probabilities `p_i = w_i / Σw` and the result is
/// `-Σ p_i log2 p_i`. Zero or fewer weights, or a non-positive total, give 0.0.
pub fn weighted_shannon_entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    weights
        .iter()
        .map(|&weight| weight / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

/// Seeded random source owned by a single generation run
///
/// Every random draw of a run (collapse choices and tie-break noise) goes
/// through one instance, so the same seed replays the same draws in the
/// same order.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform draw in `[0, bound)`
    pub fn jitter(&mut self, bound: f64) -> f64 {
        self.unit() * bound
    }

    /// Uniform 64-bit draw
    pub fn next_u64(&mut self) -> u64 {
        self.rng.random::<u64>()
    }

    /// Weighted random selection
    ///
    /// Returns an index into `weights` using the cumulative distribution, or
    /// `None` when there is nothing to choose from.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let last = weights.len().checked_sub(1)?;
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Some(0);
        }

        let mut rand_val = self.unit() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return Some(i);
            }
        }
        Some(last)
    }
}
