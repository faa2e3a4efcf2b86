//! Frame capture and GIF generation for multi-pass synthesis

use crate::io::error::{Result, SynthesisError};
use crate::io::image::render_grid;
use crate::spatial::{CategorySet, Grid};
use image::{Delay, Frame};
use std::path::Path;

/// Captures one rendered frame per synthesis pass
///
/// The initial grid is recorded as frame zero so the animation shows the
/// pattern relaxing from its seed.
pub struct PassRecorder {
    frames: Vec<Frame>,
    categories: CategorySet,
    cell_pixels: u32,
    frame_delay_ms: u32,
}

impl PassRecorder {
    /// Recorder for grids drawn with `categories`
    pub fn new(categories: CategorySet, cell_pixels: u32, frame_delay_ms: u32) -> Self {
        Self {
            frames: Vec::new(),
            categories,
            cell_pixels,
            frame_delay_ms,
        }
    }

    /// Render and store a snapshot
    pub fn record(&mut self, grid: &Grid) {
        let img = render_grid(grid, &self.categories, self.cell_pixels);
        self.frames.push(Frame::from_parts(
            img,
            0,
            0,
            Delay::from_numer_denom_ms(self.frame_delay_ms, 1),
        ));
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Encode the captured frames as an animated GIF
    ///
    /// The final frame is held longer so the end state is visible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path) -> Result<()> {
        let Some(last) = self.frames.last() else {
            return Err(SynthesisError::InvalidExemplar {
                reason: "No passes captured for visualization".to_string(),
            });
        };

        let mut frames = self.frames.clone();
        frames.push(Frame::from_parts(
            last.buffer().clone(),
            0,
            0,
            Delay::from_numer_denom_ms(self.frame_delay_ms * 10, 1),
        ));

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| SynthesisError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SynthesisError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
