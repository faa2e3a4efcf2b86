//! Exemplar sources: PNG images, the built-in island and random noise
//!
//! A PNG exemplar is converted to categories by color. Every distinct opaque
//! color becomes one category, ordered by its RGBA bytes so the same image
//! always yields the same ids. Fully transparent pixels are EMPTY.

use crate::algorithm::sampling::RandomSelector;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::{Category, CategorySet, Grid};
use std::collections::BTreeSet;
use std::path::Path;

/// Grass color of the built-in island
pub const GRASS: [u8; 4] = [0x00, 0xFF, 0x00, 0xFF];
/// Ocean color of the built-in island
pub const OCEAN: [u8; 4] = [0x00, 0x00, 0xFF, 0xFF];

/// Exemplar grid with the palette its categories refer to
#[derive(Clone, Debug)]
pub struct Exemplar {
    /// Exemplar cells
    pub grid: Grid,
    /// Palette of the exemplar
    pub categories: CategorySet,
}

impl Exemplar {
    /// Load an exemplar from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded
    /// - The image holds fewer than two distinct opaque colors
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| SynthesisError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_rgba(&img.to_rgba8())
    }

    /// Convert decoded RGBA pixels into an exemplar
    ///
    /// # Errors
    ///
    /// Returns an error if the image holds fewer than two distinct opaque colors
    /// or more colors than categories can represent
    pub fn from_rgba(img: &image::RgbaImage) -> Result<Self> {
        // Deterministic color ordering ensures reproducible category ids
        let colors: BTreeSet<[u8; 4]> = img
            .pixels()
            .map(|pixel| pixel.0)
            .filter(|rgba| rgba[3] > 0)
            .collect();

        if colors.len() < 2 {
            return Err(SynthesisError::InvalidExemplar {
                reason: format!(
                    "exemplar needs at least two distinct opaque colors, found {}",
                    colors.len()
                ),
            });
        }

        let pairs: Vec<(String, [u8; 4])> = colors
            .iter()
            .map(|rgba| {
                (
                    format!("#{:02x}{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2], rgba[3]),
                    *rgba,
                )
            })
            .collect();
        let pair_refs: Vec<(&str, [u8; 4])> = pairs
            .iter()
            .map(|(name, rgba)| (name.as_str(), *rgba))
            .collect();
        let categories = CategorySet::from_pairs(&pair_refs)?;

        let (width, height) = img.dimensions();
        let mut grid = Grid::new(width as usize, height as usize)?;
        for (x, y, pixel) in img.enumerate_pixels() {
            let state = categories.by_color(pixel.0).unwrap_or(Category::EMPTY);
            grid.set(y as isize, x as isize, state);
        }

        Ok(Self { grid, categories })
    }

    /// The 5x5 grass island surrounded by ocean corners
    ///
    /// # Errors
    ///
    /// Never fails in practice; construction goes through validating constructors
    pub fn island() -> Result<Self> {
        let categories = CategorySet::from_pairs(&[("grass", GRASS), ("ocean", OCEAN)])?;
        let g = Category::new(1);
        let o = Category::new(2);
        let grid = Grid::from_rows(&[
            [o, o, g, o, o],
            [o, g, g, g, o],
            [g, g, g, g, g],
            [o, g, g, g, o],
            [o, o, g, o, o],
        ])?;
        Ok(Self { grid, categories })
    }

    /// Random exemplar whose cells are drawn independently from `weights`
    ///
    /// `weights[i]` is the relative frequency of category id `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn noise(
        width: usize,
        height: usize,
        categories: CategorySet,
        weights: &[f64],
        selector: &mut RandomSelector,
    ) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        for row in 0..height {
            for col in 0..width {
                let index = selector.weighted_choice(weights);
                grid.set(
                    row as isize,
                    col as isize,
                    Category::new((index + 1) as u8),
                );
            }
        }
        Ok(Self { grid, categories })
    }

    /// Canvas of `width x height` EMPTY cells with the exemplar in the middle
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas dimensions are invalid
    pub fn seed_canvas(&self, width: usize, height: usize) -> Result<Grid> {
        let mut canvas = Grid::new(width, height)?;
        canvas.stamp_centered(&self.grid);
        Ok(canvas)
    }
}
