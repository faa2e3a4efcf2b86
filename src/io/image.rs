//! PNG rendering of categorical grids through a category palette

use crate::io::configuration::MAX_RENDER_DIMENSION;
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::spatial::{CategorySet, Grid};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render `grid` with each cell drawn as a `cell_pixels` square
///
/// EMPTY cells and categories outside the palette are transparent.
pub fn render_grid(grid: &Grid, categories: &CategorySet, cell_pixels: u32) -> RgbaImage {
    let scale = cell_pixels.max(1);
    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    let mut img = RgbaImage::new(width, height);

    for cell in grid.cells() {
        let color = Rgba(categories.color(cell.state));
        let left = cell.col as u32 * scale;
        let top = cell.row as u32 * scale;
        for y in top..top + scale {
            for x in left..left + scale {
                img.put_pixel(x, y, color);
            }
        }
    }

    img
}

/// Check that a `width x height` grid renders within `MAX_RENDER_DIMENSION`
///
/// # Errors
///
/// Returns an error naming the offending side if its pixel size is too large
pub fn validate_render_size(width: usize, height: usize, cell_pixels: u32) -> Result<()> {
    let scale = cell_pixels.max(1) as usize;
    for (parameter, cells) in [("width", width), ("height", height)] {
        let pixels = cells.saturating_mul(scale);
        if pixels > MAX_RENDER_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &cells,
                &format!(
                    "renders to {pixels} px at {scale} px per cell, limit is {MAX_RENDER_DIMENSION} px"
                ),
            ));
        }
    }
    Ok(())
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid holds no assigned cells
/// - The rendered image would exceed `MAX_RENDER_DIMENSION`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    categories: &CategorySet,
    output_path: &Path,
    cell_pixels: u32,
) -> Result<()> {
    if grid.is_blank() {
        return Err(SynthesisError::InvalidExemplar {
            reason: "No cells have been assigned in the grid".to_string(),
        });
    }

    validate_render_size(grid.width(), grid.height(), cell_pixels)?;
    let img = render_grid(grid, categories, cell_pixels);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
