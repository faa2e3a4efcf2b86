//! Tests for JSON export and validated import of transition models

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use terrasynth::io::exemplar::Exemplar;
    use terrasynth::io::model::{
        ModelDocument, load_model, model_from_json, model_to_json, save_model,
    };
    use terrasynth::{NeighborhoodWindow, TransitionModel, WindowMode, learn};

    fn island_model(mode: WindowMode) -> TransitionModel {
        let island = Exemplar::island().unwrap();
        let canvas = island.seed_canvas(9, 9).unwrap();
        learn(
            &canvas,
            &NeighborhoodWindow::new(3, mode).unwrap(),
            &island.categories,
        )
    }

    const VALID: &str = r#"{
        "window": { "size": 3, "mode": "causal" },
        "categories": [
            { "name": "land", "color": [0, 255, 0, 255] },
            { "name": "water", "color": [0, 0, 255, 255] }
        ],
        "rules": { "1.1.1": { "land": 0.75, "water": 0.25 } }
    }"#;

    // Tests a saved model reloads with identical rules
    #[test]
    fn test_json_preserves_rules() {
        for mode in [WindowMode::Full, WindowMode::Causal] {
            let model = island_model(mode);
            let restored = model_from_json(&model_to_json(&model).unwrap()).unwrap();

            assert_eq!(restored.len(), model.len());
            assert_eq!(restored.window(), model.window());
            for (key, distribution) in model.rules() {
                assert_eq!(restored.get(key), Some(distribution));
            }
        }
    }

    // Tests hand-written documents are accepted
    #[test]
    fn test_parse_hand_written_model() {
        let model = model_from_json(VALID).unwrap();
        let key = model.key_builder().decode("1.1.1").unwrap();
        let land = model.categories().by_name("land").unwrap();

        assert_eq!(model.len(), 1);
        assert!((model.get(&key).unwrap().probability(land) - 0.75).abs() < f64::EPSILON);
    }

    // Tests invalid documents are rejected
    #[test]
    fn test_invalid_documents_are_rejected() {
        let cases = [
            VALID.replace("causal", "diagonal"),
            VALID.replace("\"size\": 3", "\"size\": 4"),
            VALID.replace("1.1.1", "1.1"),
            VALID.replace("\"water\": 0.25", "\"lava\": 0.25"),
            VALID.replace("0.25", "0.5"),
            VALID.replace("{ \"land\": 0.75, \"water\": 0.25 }", "{}"),
            "{ not json".to_string(),
        ];

        for json in &cases {
            assert!(model_from_json(json).is_err(), "accepted: {json}");
        }
    }

    // Tests two spellings of one key are rejected instead of overwritten
    #[test]
    fn test_duplicate_key_spellings_are_rejected() {
        let json = VALID.replace(
            "\"rules\": { \"1.1.1\": { \"land\": 0.75, \"water\": 0.25 } }",
            "\"rules\": { \"1.1.1\": { \"land\": 0.75, \"water\": 0.25 }, \"01.1.1\": { \"water\": 1.0 } }",
        );
        assert_ne!(json, VALID);

        let error = model_from_json(&json).unwrap_err();
        assert!(error.to_string().contains("repeats"));
    }

    // Tests the document lists the palette in id order
    #[test]
    fn test_document_palette_order() {
        let document = ModelDocument::from_model(&island_model(WindowMode::Full));

        assert_eq!(document.window.mode, "full");
        let names: Vec<_> = document.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["grass", "ocean"]);
    }

    // Tests saving and loading through the file system
    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models").join("island.json");
        let model = island_model(WindowMode::Full);

        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.len(), model.len());
        assert!(load_model(&temp_dir.path().join("missing.json")).is_err());
    }
}
