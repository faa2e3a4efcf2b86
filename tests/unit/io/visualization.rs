//! Tests for pass recording and GIF export

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use terrasynth::io::exemplar::Exemplar;
    use terrasynth::io::visualization::PassRecorder;
    use terrasynth::{NeighborhoodWindow, RandomSelector, Synthesizer, learn};

    // Tests exporting without frames fails
    #[test]
    fn test_export_without_frames_fails() {
        let temp_dir = TempDir::new().unwrap();
        let recorder = PassRecorder::new(Exemplar::island().unwrap().categories, 2, 100);

        assert_eq!(recorder.frame_count(), 0);
        assert!(recorder.export_gif(&temp_dir.path().join("empty.gif")).is_err());
    }

    // Tests one frame per pass plus the seed is written as a GIF
    #[test]
    fn test_records_each_pass() {
        let temp_dir = TempDir::new().unwrap();
        let island = Exemplar::island().unwrap();
        let canvas = island.seed_canvas(10, 10).unwrap();
        let model = learn(&canvas, &NeighborhoodWindow::moore().unwrap(), &island.categories);

        let mut recorder = PassRecorder::new(island.categories.clone(), 2, 50);
        recorder.record(&canvas);
        let last = Synthesizer::new(&model).evolve(
            canvas,
            3,
            &mut RandomSelector::new(8),
            |_, grid, _| recorder.record(grid),
        );

        assert_eq!(recorder.frame_count(), 4);
        assert_eq!(last.dimensions(), (10, 10));

        let path = temp_dir.path().join("out").join("passes.gif");
        recorder.export_gif(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
