use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform draws in `[0, 1)`
///
/// Synthesis takes its randomness through this trait so tests can replay a
/// scripted sequence while real runs use a seeded generator.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Seeded random selector for reproducible stochastic choices
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

    /// Generic weighted random selection
    ///
    /// Returns an index into `weights` using a single draw against the
    /// cumulative distribution. Weights need not be normalized.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }
        let threshold = self.next_unit() * total;
        cumulative_index(weights.iter().copied(), threshold).unwrap_or(0)
    }
}

impl RandomSource for RandomSelector {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<f64>,
    position: usize,
}

impl ReplaySource {
    /// Script the draws to return
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Number of draws taken so far
    pub const fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ReplaySource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self
            .values
            .get(self.position % self.values.len())
            .copied()
            .unwrap_or(0.0);
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Index of the first weight whose running sum exceeds `threshold`
///
/// A threshold equal to a running sum belongs to the next interval. Rounding
/// residue past the final sum falls to the last index.
pub fn cumulative_index<I>(weights: I, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative = 0.0;
    let mut last = None;
    for (index, weight) in weights.into_iter().enumerate() {
        cumulative += weight;
        if threshold < cumulative {
            return Some(index);
        }
        last = Some(index);
    }
    last
}
