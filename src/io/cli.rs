//! Command-line interface for batch synthesis from PNG exemplars

use crate::algorithm::learner::TransitionModel;
use crate::algorithm::sampling::RandomSelector;
use crate::algorithm::synthesizer::Synthesizer;
use crate::analysis::statistics::{CategoryComposition, FrequencyReport};
use crate::io::configuration::{
    CELL_PIXELS, DEFAULT_HEIGHT, DEFAULT_PASSES, DEFAULT_SEED, DEFAULT_WIDTH, DEFAULT_WINDOW_SIZE,
    GIF_FRAME_DELAY_MS, ISLAND_STEM, MODEL_SUFFIX, OUTPUT_SUFFIX, REPORT_CONFIDENCE_Z,
    REPORT_MIN_TRIALS,
};
use crate::io::error::{Result, path_error};
use crate::io::exemplar::Exemplar;
use crate::io::image::{export_grid_as_png, validate_render_size};
use crate::io::model::save_model;
use crate::io::progress::ProgressManager;
use crate::io::visualization::PassRecorder;
use crate::spatial::{NeighborhoodWindow, WindowMode};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Which grid the transition model is learned from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LearnSource {
    /// The exemplar stamped into the EMPTY canvas; lets patterns grow outward
    #[default]
    Canvas,
    /// The exemplar on its own
    Exemplar,
}

#[derive(Parser)]
#[command(name = "terrasynth")]
#[command(
    version,
    about = "Grow categorical terrain from a small exemplar using learned neighborhood statistics"
)]
/// Command-line arguments for the synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Exemplar PNG file or directory of exemplars; output directory with `--island`
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Grow the built-in island exemplar and write results into TARGET
    #[arg(short, long)]
    pub island: bool,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of synthesis passes
    #[arg(short, long, default_value_t = DEFAULT_PASSES)]
    pub passes: usize,

    /// Canvas width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Canvas height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Neighborhood window side length (odd, at least 3)
    #[arg(short = 'k', long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window: usize,

    /// Key cells on the upper-left causal quadrant only
    #[arg(short, long)]
    pub causal: bool,

    /// Grid the model is learned from
    #[arg(short, long, value_enum, default_value_t = LearnSource::Canvas)]
    pub learn_from: LearnSource,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Write the learned model as JSON next to the output
    #[arg(short, long)]
    pub export_model: bool,

    /// Log observed outcome frequencies against model probabilities
    #[arg(short, long)]
    pub report: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-pass details
    #[arg(long)]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Window mode selected by the flags
    pub const fn window_mode(&self) -> WindowMode {
        if self.causal {
            WindowMode::Causal
        } else {
            WindowMode::Full
        }
    }

    /// Most verbose log level the flags ask for
    pub const fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Orchestrates batch processing of PNG exemplars with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, target validation
    /// fails, or an exemplar cannot be processed
    pub fn process(&mut self) -> Result<()> {
        // Fail fast on misconfiguration before touching any file
        let window = NeighborhoodWindow::new(self.cli.window, self.cli.window_mode())?;
        crate::spatial::Grid::new(self.cli.width, self.cli.height)?;
        validate_render_size(self.cli.width, self.cli.height, CELL_PIXELS)?;

        if self.cli.island {
            return self.process_island(&window);
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            info!("Nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &window)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(path_error("Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error("Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_island(&mut self, window: &NeighborhoodWindow) -> Result<()> {
        if self.cli.target.is_file() {
            return Err(path_error("Island output target must be a directory"));
        }
        std::fs::create_dir_all(&self.cli.target)?;

        // Outputs are named as if the preset were an exemplar file in TARGET
        let naming_path = self.cli.target.join(format!("{ISLAND_STEM}.png"));
        if !self.should_process_file(&naming_path) {
            info!("Nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(1);
        }

        self.process_exemplar(&Exemplar::island()?, &naming_path, 0, window)?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        window: &NeighborhoodWindow,
    ) -> Result<()> {
        let exemplar = Exemplar::from_png_file(input_path)?;
        self.process_exemplar(&exemplar, input_path, index, window)
    }

    fn process_exemplar(
        &mut self,
        exemplar: &Exemplar,
        input_path: &Path,
        index: usize,
        window: &NeighborhoodWindow,
    ) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.passes);
        }

        let canvas = exemplar.seed_canvas(self.cli.width, self.cli.height)?;

        let model = match self.cli.learn_from {
            LearnSource::Canvas => TransitionModel::learn(&canvas, window, &exemplar.categories),
            LearnSource::Exemplar => {
                TransitionModel::learn(&exemplar.grid, window, &exemplar.categories)
            }
        };

        if model.is_empty() {
            warn!(
                "{}: no neighborhood fits a {window} window; the canvas will stay unchanged",
                input_path.display()
            );
        }
        info!(
            "{}: learned {} patterns from {} observations",
            input_path.display(),
            model.len(),
            model.summary().observations
        );

        if self.cli.export_model {
            save_model(&model, &Self::get_model_path(input_path))?;
        }

        let mut recorder = self.cli.visualize.then(|| {
            PassRecorder::new(exemplar.categories.clone(), CELL_PIXELS, GIF_FRAME_DELAY_MS)
        });
        if let Some(ref mut recorder) = recorder {
            recorder.record(&canvas);
        }

        let mut report = self.cli.report.then(FrequencyReport::new);
        let mut previous = canvas.clone();
        let mut random = RandomSelector::new(self.cli.seed);
        let progress = self.progress_manager.as_ref();

        let result = Synthesizer::new(&model).evolve(
            canvas,
            self.cli.passes,
            &mut random,
            |pass, grid, statistics| {
                debug!(
                    pass,
                    sampled = statistics.sampled,
                    changed = statistics.changed,
                    unseen = statistics.unseen,
                    "pass complete"
                );
                if let Some(ref mut recorder) = recorder {
                    recorder.record(grid);
                }
                if let Some(ref mut report) = report {
                    report.record(&previous, grid, &model);
                    previous = grid.clone();
                }
                if let Some(pm) = progress {
                    pm.update_pass(index, pass);
                }
            },
        );

        export_grid_as_png(
            &result,
            &exemplar.categories,
            &Self::get_output_path(input_path),
            CELL_PIXELS,
        )?;

        if let Some(ref recorder) = recorder {
            recorder.export_gif(&Self::get_visualization_path(input_path))?;
        }

        let composition = CategoryComposition::of(&result);
        for (category, count) in composition.counts() {
            debug!(
                "{}: {} cells of {}",
                input_path.display(),
                count,
                exemplar.categories.name(category)
            );
        }

        if let Some(ref report) = report {
            let comparisons = report.compare(&model, REPORT_MIN_TRIALS);
            let outside = comparisons
                .iter()
                .filter(|comparison| !comparison.within(REPORT_CONFIDENCE_Z))
                .count();
            info!(
                "{}: {} draws over {} keys, max deviation {:.4}, {} of {} outcomes outside the 95% band",
                input_path.display(),
                report.trials(),
                report.keys(),
                report.max_deviation(&model, REPORT_MIN_TRIALS),
                outside,
                comparisons.len()
            );
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index);
        }

        info!(
            "{}: {} passes in {:.2?}",
            input_path.display(),
            self.cli.passes,
            start_time.elapsed()
        );

        Ok(())
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, "_visualization", "gif")
    }

    fn get_model_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, MODEL_SUFFIX, "json")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Results written next to exemplars must not be picked up as exemplars
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
