use bitvec::prelude::*;
use std::fmt;

use crate::spatial::{Category, CategorySet, Grid, NeighborhoodWindow};

/// Bit-packed, ordered encoding of a neighborhood
///
/// Each neighbor occupies a fixed-width slot at a fixed bit position, so equal
/// ordered category lists always produce equal keys and hashing never touches
/// strings. EMPTY neighbors are stored as id 0 and take part in the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternKey {
    bits: BitVec<u64, Lsb0>,
    slot_width: u8,
}

impl PatternKey {
    /// Number of neighbor positions encoded in the key
    pub fn len(&self) -> usize {
        if self.slot_width == 0 {
            0
        } else {
            self.bits.len() / usize::from(self.slot_width)
        }
    }

    /// Whether the key encodes no positions
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Decode the ordered neighbor categories
    pub fn categories(&self) -> Vec<Category> {
        let width = usize::from(self.slot_width);
        if width == 0 {
            return Vec::new();
        }
        self.bits
            .chunks_exact(width)
            .map(|slot| Category::new(slot.load_le::<u8>()))
            .collect()
    }

    /// Deterministic text form: neighbor ids joined by `.`
    ///
    /// EMPTY is written as `0`. The inverse is [`PatternKeyBuilder::decode`].
    pub fn encode(&self) -> String {
        self.categories()
            .iter()
            .map(|category| category.id().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.encode())
    }
}

/// Turns extracted neighborhoods into [`PatternKey`]s for one window
///
/// A neighborhood shorter than the window's expected length means the
/// extractor dropped out-of-bounds offsets; such neighborhoods have no key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternKeyBuilder {
    window: NeighborhoodWindow,
    slot_width: u8,
    max_id: u8,
}

impl PatternKeyBuilder {
    /// Builder for `window` over the ids of `categories`
    pub fn new(window: NeighborhoodWindow, categories: &CategorySet) -> Self {
        Self {
            window,
            slot_width: categories.bits_per_category() as u8,
            max_id: categories.len() as u8,
        }
    }

    /// Window the keys are built for
    pub const fn window(&self) -> &NeighborhoodWindow {
        &self.window
    }

    /// Number of neighbors a key is built from
    pub fn expected_len(&self) -> usize {
        self.window.expected_len()
    }

    /// Bits used per neighbor slot
    pub const fn slot_width(&self) -> u8 {
        self.slot_width
    }

    /// Encode an ordered neighborhood
    ///
    /// Returns `None` (insufficient data) when the neighborhood does not have
    /// exactly the expected length, or holds a category outside the set.
    pub fn build(&self, neighbors: &[Category]) -> Option<PatternKey> {
        if neighbors.len() != self.expected_len() {
            return None;
        }
        if neighbors.iter().any(|category| category.id() > self.max_id) {
            return None;
        }

        let width = usize::from(self.slot_width);
        let mut bits = bitvec![u64, Lsb0; 0; neighbors.len() * width];
        for (index, category) in neighbors.iter().enumerate() {
            let slot = bits.get_mut(index * width..(index + 1) * width)?;
            slot.store_le::<u8>(category.id());
        }

        Some(PatternKey {
            bits,
            slot_width: self.slot_width,
        })
    }

    /// Key of the cell at `(row, col)` of a frozen grid
    ///
    /// Cells whose square footprint is not entirely inside the grid have no
    /// key, whatever the window mode. `buffer` is scratch space for extraction.
    pub fn key_at(
        &self,
        grid: &Grid,
        row: usize,
        col: usize,
        buffer: &mut Vec<Category>,
    ) -> Option<PatternKey> {
        let (rows, cols) = grid.dimensions();
        if !self.window.fits(rows, cols, row, col) {
            return None;
        }
        self.window.extract_into(grid, row, col, buffer);
        self.build(buffer)
    }

    /// Parse the text form produced by [`PatternKey::encode`]
    pub fn decode(&self, text: &str) -> Option<PatternKey> {
        let neighbors = text
            .split('.')
            .map(|part| part.parse::<u8>().ok().map(Category::new))
            .collect::<Option<Vec<_>>>()?;
        self.build(&neighbors)
    }
}
