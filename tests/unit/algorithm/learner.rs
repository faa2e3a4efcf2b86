//! Tests for counting, normalization and the learned model invariants

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use terrasynth::algorithm::learner::PROBABILITY_TOLERANCE;
    use terrasynth::io::exemplar::Exemplar;
    use terrasynth::io::model::{model_from_json, model_to_json};
    use terrasynth::{
        Category, CategorySet, Distribution, Grid, NeighborhoodWindow, TransitionModel,
        WindowMode, learn,
    };

    const LAND: Category = Category::new(1);
    const WATER: Category = Category::new(2);

    fn palette() -> CategorySet {
        CategorySet::from_pairs(&[("land", [0, 255, 0, 255]), ("water", [0, 0, 255, 255])])
            .unwrap()
    }

    // Tests every stored distribution sums to one
    #[test]
    fn test_distributions_sum_to_one() {
        let island = Exemplar::island().unwrap();
        let canvas = island.seed_canvas(11, 11).unwrap();

        for mode in [WindowMode::Full, WindowMode::Causal] {
            let window = NeighborhoodWindow::new(3, mode).unwrap();
            let model = learn(&canvas, &window, &island.categories);

            assert!(!model.is_empty());
            for (_, distribution) in model.rules() {
                assert!((distribution.total() - 1.0).abs() < PROBABILITY_TOLERANCE);
                assert!(!distribution.outcomes().is_empty());
                assert!(distribution.outcomes().iter().all(|&(c, p)| p > 0.0 && !c.is_empty()));
            }
        }
    }

    // Tests a single-footprint exemplar yields one certain rule
    #[test]
    fn test_single_footprint_gives_certain_outcome() {
        let grid = Grid::from_rows(&[
            [LAND, WATER, LAND],
            [WATER, WATER, LAND],
            [LAND, LAND, WATER],
        ])
        .unwrap();
        let window = NeighborhoodWindow::moore().unwrap();
        let model = learn(&grid, &window, &palette());

        assert_eq!(model.len(), 1);
        let key = model
            .key_builder()
            .build(&[LAND, WATER, LAND, WATER, LAND, LAND, LAND, WATER])
            .unwrap();
        let distribution = model.get(&key).unwrap();
        assert!((distribution.probability(WATER) - 1.0).abs() < f64::EPSILON);
        assert!(distribution.probability(LAND).abs() < f64::EPSILON);
        assert_eq!(distribution.outcomes().len(), 1);
    }

    // Tests repeated keys split probability by observed counts
    #[test]
    fn test_counts_are_normalized_per_key() {
        let w = WATER;
        let grid = Grid::from_rows(&[[w, w, w, w, w], [w, LAND, w, w, w], [w, w, w, w, w]])
            .unwrap();
        let window = NeighborhoodWindow::moore().unwrap();
        let model = learn(&grid, &window, &palette());

        assert_eq!(model.len(), 2);
        assert_eq!(model.summary().observations, 3);
        assert_eq!(model.summary().insufficient_cells, 12);

        let all_water = model.key_builder().build(&[w; 8]).unwrap();
        let distribution = model.get(&all_water).unwrap();
        assert!((distribution.probability(LAND) - 0.5).abs() < 1e-12);
        assert!((distribution.probability(WATER) - 0.5).abs() < 1e-12);
    }

    // Tests all-EMPTY and undersized exemplars give empty models
    #[test]
    fn test_degenerate_exemplars_give_empty_models() {
        let window = NeighborhoodWindow::moore().unwrap();

        let blank = Grid::new(6, 6).unwrap();
        let model = learn(&blank, &window, &palette());
        assert!(model.is_empty());
        assert_eq!(model.summary().empty_cells, 36);

        let tiny = Grid::filled(2, 2, LAND).unwrap();
        let model = learn(&tiny, &window, &palette());
        assert!(model.is_empty());
        assert_eq!(model.summary().insufficient_cells, 4);
    }

    // Tests EMPTY cells never contribute observations but may be neighbors
    #[test]
    fn test_empty_cells_are_neighbors_not_outcomes() {
        let island = Exemplar::island().unwrap();
        let canvas = island.seed_canvas(9, 9).unwrap();
        let window = NeighborhoodWindow::moore().unwrap();
        let model = learn(&canvas, &window, &island.categories);

        assert_eq!(model.summary().observations, 25);
        assert!(
            model
                .rules()
                .any(|(key, _)| key.categories().contains(&Category::EMPTY))
        );
    }

    // Tests explicit distributions are validated
    #[test]
    fn test_distribution_validation() {
        assert!(Distribution::new(vec![(LAND, 0.75), (WATER, 0.25)]).is_ok());
        assert!(Distribution::new(vec![(LAND, 0.75), (WATER, 0.20)]).is_err());
        assert!(Distribution::new(vec![(LAND, 1.5), (WATER, -0.5)]).is_err());
        assert!(Distribution::new(vec![(Category::EMPTY, 1.0)]).is_err());
        assert!(Distribution::new(vec![(LAND, 0.5), (LAND, 0.5)]).is_err());

        let trimmed = Distribution::new(vec![(WATER, 1.0), (LAND, 0.0)]).unwrap();
        assert_eq!(trimmed.outcomes(), &[(WATER, 1.0)]);
    }

    // Tests outcomes are ordered by category id for sampling
    #[test]
    fn test_distribution_order_and_sampling() {
        let distribution = Distribution::new(vec![(WATER, 0.25), (LAND, 0.75)]).unwrap();

        assert_eq!(distribution.outcomes()[0].0, LAND);
        assert_eq!(distribution.sample(0.10), Some(LAND));
        assert_eq!(distribution.sample(0.75), Some(WATER));
    }

    // Tests zero counts never produce a stored distribution
    #[test]
    fn test_from_counts_omits_unobserved() {
        let categories = palette();
        let mut counts = BTreeMap::new();
        assert!(Distribution::from_counts(&counts, &categories).is_none());

        counts.insert(LAND, 0);
        assert!(Distribution::from_counts(&counts, &categories).is_none());

        counts.insert(WATER, 3);
        let distribution = Distribution::from_counts(&counts, &categories).unwrap();
        assert_eq!(distribution.outcomes(), &[(WATER, 1.0)]);
    }

    // Tests ids outside the palette are dropped before normalizing
    #[test]
    fn test_from_counts_ignores_foreign_ids() {
        let categories = palette();
        let mut counts = BTreeMap::new();
        counts.insert(Category::new(3), 5);
        assert!(Distribution::from_counts(&counts, &categories).is_none());

        counts.insert(LAND, 1);
        counts.insert(WATER, 3);
        let distribution = Distribution::from_counts(&counts, &categories).unwrap();
        assert_eq!(distribution.outcomes(), &[(LAND, 0.25), (WATER, 0.75)]);
    }

    // Tests foreign cells and neighbors are counted apart from edge cells
    #[test]
    fn test_foreign_ids_are_not_learned() {
        let foreign = Category::new(3);
        let grid = Grid::from_rows(&[
            [LAND, LAND, LAND, LAND],
            [LAND, foreign, LAND, LAND],
            [LAND, LAND, LAND, LAND],
        ])
        .unwrap();
        let model = learn(&grid, &NeighborhoodWindow::moore().unwrap(), &palette());

        assert!(model.is_empty());
        assert_eq!(model.summary().foreign_cells, 2);
        assert_eq!(model.summary().insufficient_cells, 10);
        assert_eq!(model.summary().observations, 0);
        assert!(model_from_json(&model_to_json(&model).unwrap()).is_ok());
    }

    // Tests a model learned next to foreign ids still reloads from JSON
    #[test]
    fn test_model_with_foreign_ids_round_trips() {
        let foreign = Category::new(3);
        let mut rows = vec![vec![LAND; 6]; 5];
        rows[0][0] = foreign;
        rows[2][2] = WATER;
        let grid = Grid::from_rows(&rows).unwrap();
        let model = learn(&grid, &NeighborhoodWindow::moore().unwrap(), &palette());

        assert!(!model.is_empty());
        assert!(
            model
                .rules()
                .all(|(_, d)| d.outcomes().iter().all(|&(c, _)| c != foreign))
        );
        let restored = model_from_json(&model_to_json(&model).unwrap()).unwrap();
        assert_eq!(restored.len(), model.len());
    }

    // Tests hand-built models keep their window and palette
    #[test]
    fn test_empty_model_reports_configuration() {
        let window = NeighborhoodWindow::new(5, WindowMode::Causal).unwrap();
        let model = TransitionModel::empty(window.clone(), palette());

        assert!(model.is_empty());
        assert_eq!(model.window(), &window);
        assert_eq!(model.categories().len(), 2);
        assert_eq!(model.key_builder().expected_len(), 8);
    }
}
