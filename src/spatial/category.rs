//! Terrain categories and the application-defined category palette

use crate::io::error::{Result, invalid_parameter};
use std::collections::HashSet;
use std::fmt;

/// Opaque terrain label held by a grid cell
///
/// Ids are 1-based positions in a [`CategorySet`]; id 0 is reserved for
/// [`Category::EMPTY`], the "not yet assigned" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(u8);

impl Category {
    /// Sentinel for cells that have not been assigned a category
    pub const EMPTY: Self = Self(0);

    /// Wrap a raw category id
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw category id (0 for EMPTY)
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Whether this is the EMPTY sentinel
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "EMPTY")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Named category with its display color
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Human readable name, unique within a set
    pub name: String,
    /// RGBA color used by renderers
    pub color: [u8; 4],
}

/// Ordered, validated set of non-EMPTY categories
///
/// The position of an entry defines its id: the first entry is `Category::new(1)`.
/// This order is also the deterministic order used for cumulative sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySet {
    entries: Vec<CategoryInfo>,
}

/// Smallest palette that makes a categorical model meaningful
pub const MIN_CATEGORIES: usize = 2;

/// Largest palette representable by `u8` ids with 0 reserved
pub const MAX_CATEGORIES: usize = u8::MAX as usize;

impl CategorySet {
    /// Build a category set from named entries
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two or more than 255 categories are given,
    /// or if two categories share a name
    pub fn new(entries: Vec<CategoryInfo>) -> Result<Self> {
        if entries.len() < MIN_CATEGORIES {
            return Err(invalid_parameter(
                "categories",
                &entries.len(),
                &format!("at least {MIN_CATEGORIES} non-empty categories are required"),
            ));
        }
        if entries.len() > MAX_CATEGORIES {
            return Err(invalid_parameter(
                "categories",
                &entries.len(),
                &format!("at most {MAX_CATEGORIES} categories are supported"),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(invalid_parameter(
                    "categories",
                    &entry.name,
                    &"category names must be unique",
                ));
            }
        }

        Ok(Self { entries })
    }

    /// Convenience constructor from `(name, color)` pairs
    ///
    /// # Errors
    ///
    /// Same conditions as [`CategorySet::new`]
    pub fn from_pairs(pairs: &[(&str, [u8; 4])]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(name, color)| CategoryInfo {
                    name: name.to_string(),
                    color,
                })
                .collect(),
        )
    }

    /// Number of non-EMPTY categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a valid set holds at least two categories
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories in id order
    pub fn categories(&self) -> impl Iterator<Item = Category> {
        (1..=self.entries.len()).map(|id| Category::new(id as u8))
    }

    /// Whether `category` belongs to this set or is EMPTY
    pub fn admits(&self, category: Category) -> bool {
        usize::from(category.id()) <= self.entries.len()
    }

    /// Metadata for a category, `None` for EMPTY or unknown ids
    pub fn info(&self, category: Category) -> Option<&CategoryInfo> {
        usize::from(category.id())
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Name of a category; EMPTY and unknown ids render as `"empty"`
    pub fn name(&self, category: Category) -> &str {
        self.info(category).map_or("empty", |info| info.name.as_str())
    }

    /// Display color; EMPTY and unknown ids are transparent
    pub fn color(&self, category: Category) -> [u8; 4] {
        self.info(category).map_or([0, 0, 0, 0], |info| info.color)
    }

    /// Look up a category by name
    pub fn by_name(&self, name: &str) -> Option<Category> {
        self.entries
            .iter()
            .position(|info| info.name == name)
            .map(|index| Category::new((index + 1) as u8))
    }

    /// Look up a category by exact color
    pub fn by_color(&self, color: [u8; 4]) -> Option<Category> {
        self.entries
            .iter()
            .position(|info| info.color == color)
            .map(|index| Category::new((index + 1) as u8))
    }

    /// Entries in id order
    pub fn entries(&self) -> &[CategoryInfo] {
        &self.entries
    }

    /// Bits needed to store any id of this set, EMPTY included
    pub fn bits_per_category(&self) -> usize {
        (usize::BITS - self.entries.len().leading_zeros()) as usize
    }
}
