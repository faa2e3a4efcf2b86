//! Grid composition and learned-versus-synthesized outcome frequencies

use std::collections::{BTreeMap, HashMap};

use crate::algorithm::key::PatternKey;
use crate::algorithm::learner::TransitionModel;
use crate::math::probability::{binomial_z_score, proportion_half_width, two_sided_p_value};
use crate::spatial::{Category, Grid};

/// Share of each category in a grid
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryComposition {
    counts: BTreeMap<Category, usize>,
    total: usize,
}

impl CategoryComposition {
    /// Count the categories of `grid`, EMPTY included
    pub fn of(grid: &Grid) -> Self {
        let mut counts = BTreeMap::new();
        for state in grid.states() {
            *counts.entry(state).or_insert(0) += 1;
        }
        Self {
            counts,
            total: grid.width() * grid.height(),
        }
    }

    /// Number of cells holding `category`
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Fraction of cells holding `category`
    pub fn ratio(&self, category: Category) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(category) as f64 / self.total as f64
        }
    }

    /// Categories present, in id order, with their counts
    pub fn counts(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.counts.iter().map(|(&category, &count)| (category, count))
    }
}

/// Observed outcome frequency of one category under one key
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeComparison {
    /// Key the outcome was drawn under
    pub key: PatternKey,
    /// Outcome category
    pub category: Category,
    /// Probability stored in the model
    pub expected: f64,
    /// Fraction of draws that produced the category
    pub observed: f64,
    /// Number of draws made under the key
    pub trials: usize,
    /// Standardized deviation of the observed count
    pub z_score: f64,
}

impl OutcomeComparison {
    /// Two-sided p-value of the deviation
    pub fn p_value(&self) -> f64 {
        two_sided_p_value(self.z_score)
    }

    /// Whether the observed frequency lies within the normal confidence band
    pub fn within(&self, z: f64) -> bool {
        (self.observed - self.expected).abs() <= proportion_half_width(self.expected, self.trials, z)
    }
}

/// Tallies what synthesis actually produced for each modeled key
///
/// Feed it consecutive `(before, after)` grid pairs; only cells whose
/// pre-pass key exists in the model are counted.
#[derive(Clone, Debug, Default)]
pub struct FrequencyReport {
    tallies: HashMap<PatternKey, BTreeMap<Category, usize>>,
}

impl FrequencyReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcomes of one pass from `before` to `after`
    pub fn record(&mut self, before: &Grid, after: &Grid, model: &TransitionModel) {
        let keys = model.key_builder();
        let mut buffer = Vec::with_capacity(keys.expected_len());

        for cell in before.cells() {
            let Some(key) = keys.key_at(before, cell.row, cell.col, &mut buffer) else {
                continue;
            };
            if model.get(&key).is_none() {
                continue;
            }
            let Some(outcome) = after.get(cell.row, cell.col) else {
                continue;
            };
            *self
                .tallies
                .entry(key)
                .or_default()
                .entry(outcome)
                .or_insert(0) += 1;
        }
    }

    /// Total draws recorded across all keys
    pub fn trials(&self) -> usize {
        self.tallies.values().flat_map(BTreeMap::values).sum()
    }

    /// Number of keys with at least one recorded draw
    pub fn keys(&self) -> usize {
        self.tallies.len()
    }

    /// Compare every modeled outcome against its observed frequency
    ///
    /// Keys with fewer than `min_trials` draws are skipped.
    pub fn compare(&self, model: &TransitionModel, min_trials: usize) -> Vec<OutcomeComparison> {
        let mut comparisons = Vec::new();
        for (key, outcomes) in &self.tallies {
            let trials: usize = outcomes.values().sum();
            if trials < min_trials {
                continue;
            }
            let Some(distribution) = model.get(key) else {
                continue;
            };
            for &(category, expected) in distribution.outcomes() {
                let successes = outcomes.get(&category).copied().unwrap_or(0);
                comparisons.push(OutcomeComparison {
                    key: key.clone(),
                    category,
                    expected,
                    observed: successes as f64 / trials as f64,
                    trials,
                    z_score: binomial_z_score(successes, trials, expected),
                });
            }
        }
        comparisons
    }

    /// Largest absolute gap between observed and expected frequencies
    pub fn max_deviation(&self, model: &TransitionModel, min_trials: usize) -> f64 {
        self.compare(model, min_trials)
            .iter()
            .map(|comparison| (comparison.observed - comparison.expected).abs())
            .fold(0.0, f64::max)
    }
}
