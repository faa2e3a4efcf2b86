//! Conditional probability tables learned from an exemplar grid
//!
//! For each cell of the exemplar the learner keys the cell's neighborhood and
//! counts the cell's own category as the outcome for that key. Counts are then
//! normalized per key. Keys that never received an observation are absent from
//! the model, so absence is the only encoding of "unseen".

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::algorithm::key::{PatternKey, PatternKeyBuilder};
use crate::algorithm::sampling::cumulative_index;
use crate::io::error::{Result, computation_error};
use crate::spatial::{Category, CategorySet, Grid, NeighborhoodWindow};

/// Tolerance for a distribution's probabilities to sum to one
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Probability distribution over non-EMPTY outcome categories
///
/// Outcomes are kept in ascending category id order, which is the order
/// used for cumulative sampling. Only outcomes with positive probability are
/// stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    outcomes: Vec<(Category, f64)>,
}

impl Distribution {
    /// Validate and normalize ordering of explicit probabilities
    ///
    /// Zero-probability entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if an outcome is EMPTY or repeated, a probability is
    /// negative or not finite, or the probabilities do not sum to one
    pub fn new(outcomes: Vec<(Category, f64)>) -> Result<Self> {
        let mut merged: BTreeMap<Category, f64> = BTreeMap::new();
        for (category, probability) in outcomes {
            if category.is_empty() {
                return Err(computation_error(
                    "distribution",
                    &"EMPTY is not a valid outcome",
                ));
            }
            if !probability.is_finite() || probability < 0.0 {
                return Err(computation_error(
                    "distribution",
                    &format!("probability {probability} for {category} is not a valid weight"),
                ));
            }
            if merged.insert(category, probability).is_some() {
                return Err(computation_error(
                    "distribution",
                    &format!("outcome {category} listed twice"),
                ));
            }
        }

        let total: f64 = merged.values().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(computation_error(
                "distribution",
                &format!("probabilities sum to {total}, expected 1"),
            ));
        }

        Ok(Self {
            outcomes: merged.into_iter().filter(|&(_, p)| p > 0.0).collect(),
        })
    }

    /// Normalize observation counts, `None` when nothing was observed
    ///
    /// EMPTY and ids outside `categories` are not outcomes and are ignored
    /// before normalizing.
    pub fn from_counts(
        counts: &BTreeMap<Category, u32>,
        categories: &CategorySet,
    ) -> Option<Self> {
        let admitted: Vec<(Category, u32)> = counts
            .iter()
            .filter(|&(category, &count)| {
                count > 0 && !category.is_empty() && categories.admits(*category)
            })
            .map(|(&category, &count)| (category, count))
            .collect();

        let total: u64 = admitted.iter().map(|&(_, count)| u64::from(count)).sum();
        if total == 0 {
            return None;
        }
        let total = total as f64;
        Some(Self {
            outcomes: admitted
                .into_iter()
                .map(|(category, count)| (category, f64::from(count) / total))
                .collect(),
        })
    }

    /// Outcomes with their probabilities in sampling order
    pub fn outcomes(&self) -> &[(Category, f64)] {
        &self.outcomes
    }

    /// Probability of `category`, zero when it is not an outcome
    pub fn probability(&self, category: Category) -> f64 {
        self.outcomes
            .iter()
            .find(|&&(outcome, _)| outcome == category)
            .map_or(0.0, |&(_, p)| p)
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|&(_, p)| p).sum()
    }

    /// Select the outcome whose cumulative interval contains `draw`
    ///
    /// Intervals are half-open, so a draw equal to a running sum selects the
    /// next outcome.
    pub fn sample(&self, draw: f64) -> Option<Category> {
        cumulative_index(self.outcomes.iter().map(|&(_, p)| p), draw)
            .and_then(|index| self.outcomes.get(index))
            .map(|&(category, _)| category)
    }
}

/// Counters collected while scanning an exemplar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LearningSummary {
    /// Cells visited
    pub cells_scanned: usize,
    /// Cells skipped because their own state is EMPTY
    pub empty_cells: usize,
    /// Cells skipped because their neighborhood was insufficient
    pub insufficient_cells: usize,
    /// Cells skipped because they or a neighbor hold an id outside the palette
    pub foreign_cells: usize,
    /// Cells that contributed an observation
    pub observations: usize,
}

/// Learned mapping from pattern keys to outcome distributions
///
/// Immutable once learned; the key builder it was learned with travels with it
/// so synthesis keys cells exactly the way learning did.
#[derive(Clone, Debug)]
pub struct TransitionModel {
    keys: PatternKeyBuilder,
    categories: CategorySet,
    rules: HashMap<PatternKey, Distribution>,
    summary: LearningSummary,
}

impl TransitionModel {
    /// A model with no rules
    pub fn empty(window: NeighborhoodWindow, categories: CategorySet) -> Self {
        Self {
            keys: PatternKeyBuilder::new(window, &categories),
            categories,
            rules: HashMap::new(),
            summary: LearningSummary::default(),
        }
    }

    /// Build a model from explicit rules
    ///
    /// Used when loading a stored model or hand-writing one.
    pub fn from_rules(
        window: NeighborhoodWindow,
        categories: CategorySet,
        rules: HashMap<PatternKey, Distribution>,
    ) -> Self {
        let mut model = Self::empty(window, categories);
        model.rules = rules;
        model
    }

    /// Scan `exemplar` and accumulate per-key outcome counts
    ///
    /// EMPTY cells, cells without a full neighborhood and cells whose footprint
    /// holds an id outside `categories` contribute nothing. An exemplar that
    /// offers no observation yields an empty, valid model.
    pub fn learn(exemplar: &Grid, window: &NeighborhoodWindow, categories: &CategorySet) -> Self {
        let keys = PatternKeyBuilder::new(window.clone(), categories);
        let mut counts: HashMap<PatternKey, BTreeMap<Category, u32>> = HashMap::new();
        let mut summary = LearningSummary::default();
        let mut buffer = Vec::with_capacity(keys.expected_len());
        let (rows, cols) = exemplar.dimensions();

        for cell in exemplar.cells() {
            summary.cells_scanned += 1;
            if cell.state.is_empty() {
                summary.empty_cells += 1;
                continue;
            }
            if !categories.admits(cell.state) {
                summary.foreign_cells += 1;
                continue;
            }
            if !window.fits(rows, cols, cell.row, cell.col) {
                summary.insufficient_cells += 1;
                continue;
            }
            // The footprint fits, so a missing key means a foreign neighbor
            let Some(key) = keys.key_at(exemplar, cell.row, cell.col, &mut buffer) else {
                summary.foreign_cells += 1;
                continue;
            };
            *counts.entry(key).or_default().entry(cell.state).or_insert(0) += 1;
            summary.observations += 1;
        }

        let rules: HashMap<PatternKey, Distribution> = counts
            .into_iter()
            .filter_map(|(key, outcome_counts)| {
                Distribution::from_counts(&outcome_counts, categories)
                    .map(|distribution| (key, distribution))
            })
            .collect();

        debug!(
            window = %window,
            keys = rules.len(),
            observations = summary.observations,
            empty = summary.empty_cells,
            insufficient = summary.insufficient_cells,
            foreign = summary.foreign_cells,
            "learned transition model"
        );

        Self {
            keys,
            categories: categories.clone(),
            rules,
            summary,
        }
    }

    /// Distribution for `key`, `None` when the key was never observed
    pub fn get(&self, key: &PatternKey) -> Option<&Distribution> {
        self.rules.get(key)
    }

    /// All rules, in arbitrary order
    pub fn rules(&self) -> impl Iterator<Item = (&PatternKey, &Distribution)> {
        self.rules.iter()
    }

    /// Number of learned keys
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no key was learned
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Key builder the model was learned with
    pub const fn key_builder(&self) -> &PatternKeyBuilder {
        &self.keys
    }

    /// Window the model was learned with
    pub const fn window(&self) -> &NeighborhoodWindow {
        self.keys.window()
    }

    /// Category palette of the model
    pub const fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Counters from the learning scan
    pub const fn summary(&self) -> &LearningSummary {
        &self.summary
    }
}

/// Learn a [`TransitionModel`] from an exemplar grid
pub fn learn(
    exemplar: &Grid,
    window: &NeighborhoodWindow,
    categories: &CategorySet,
) -> TransitionModel {
    TransitionModel::learn(exemplar, window, categories)
}
