//! Tests for grid composition and the outcome frequency report

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use terrasynth::analysis::statistics::{CategoryComposition, FrequencyReport};
    use terrasynth::{
        Category, CategorySet, Distribution, Grid, NeighborhoodWindow, RandomSelector,
        ReplaySource, TransitionModel, synthesize_pass,
    };

    const LAND: Category = Category::new(1);
    const WATER: Category = Category::new(2);

    fn uniform_land_model(p_land: f64) -> TransitionModel {
        let window = NeighborhoodWindow::moore().unwrap();
        let categories =
            CategorySet::from_pairs(&[("land", [0, 255, 0, 255]), ("water", [0, 0, 255, 255])])
                .unwrap();
        let key = TransitionModel::empty(window.clone(), categories.clone())
            .key_builder()
            .build(&[LAND; 8])
            .unwrap();
        let mut rules = HashMap::new();
        rules.insert(
            key,
            Distribution::new(vec![(LAND, p_land), (WATER, 1.0 - p_land)]).unwrap(),
        );
        TransitionModel::from_rules(window, categories, rules)
    }

    // Tests composition counts and ratios include EMPTY
    #[test]
    fn test_composition_counts() {
        let grid = Grid::from_rows(&[vec![LAND, LAND], vec![WATER]]).unwrap();
        let composition = CategoryComposition::of(&grid);

        assert_eq!(composition.count(LAND), 2);
        assert_eq!(composition.count(WATER), 1);
        assert_eq!(composition.count(Category::EMPTY), 1);
        assert!((composition.ratio(LAND) - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            composition.counts().map(|(c, _)| c).collect::<Vec<_>>(),
            vec![Category::EMPTY, LAND, WATER]
        );
    }

    // Tests only cells with modeled keys are tallied
    #[test]
    fn test_record_counts_modeled_keys_only() {
        let model = uniform_land_model(0.75);
        let before = Grid::filled(5, 3, LAND).unwrap();
        let after = synthesize_pass(&before, &model, &mut ReplaySource::new(vec![0.1, 0.8, 0.9]));

        let mut report = FrequencyReport::new();
        report.record(&before, &after, &model);

        assert_eq!(report.trials(), 3);
        assert_eq!(report.keys(), 1);

        let comparisons = report.compare(&model, 1);
        assert_eq!(comparisons.len(), 2);
        let land = comparisons.iter().find(|c| c.category == LAND).unwrap();
        assert!((land.observed - 1.0 / 3.0).abs() < 1e-12);
        assert!(report.compare(&model, 4).is_empty());
    }

    // Tests sampled frequencies agree with learned probabilities
    #[test]
    fn test_sampled_frequencies_match_model() {
        let model = uniform_land_model(0.75);
        let before = Grid::filled(102, 102, LAND).unwrap();
        let after = synthesize_pass(&before, &model, &mut RandomSelector::new(42));

        let mut report = FrequencyReport::new();
        report.record(&before, &after, &model);

        assert_eq!(report.trials(), 10_000);
        let comparisons = report.compare(&model, 30);
        assert!(comparisons.iter().all(|c| c.within(3.5)), "{comparisons:?}");
        assert!(comparisons.iter().all(|c| c.p_value() > 0.0005));
        assert!(report.max_deviation(&model, 30) < 0.03);
    }

    // Tests an empty report has nothing to compare
    #[test]
    fn test_empty_report() {
        let model = uniform_land_model(0.5);
        let report = FrequencyReport::new();

        assert_eq!(report.trials(), 0);
        assert!(report.compare(&model, 0).is_empty());
        assert!(report.max_deviation(&model, 0).abs() < f64::EPSILON);
    }
}
