//! Sparse storage of generated heights keyed by [`GridCoord`].
//!
//! The field is unbounded: any coordinate may be queried, and an absent
//! entry means "not generated yet" rather than any particular height.

use rustc_hash::FxHashMap;

use crate::coord::GridCoord;

/// Sparse height map with running global extremes.
#[derive(Clone, Debug)]
pub struct HeightField {
    heights: FxHashMap<GridCoord, f64>,
    min: f64,
    max: f64,
}

impl HeightField {
    /// Creates an empty field with extremes at `+inf` / `-inf`.
    pub fn new() -> Self {
        Self {
            heights: FxHashMap::default(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Height at `coord`, or `None` if nothing has been generated there.
    pub fn get(&self, coord: GridCoord) -> Option<f64> {
        self.heights.get(&coord).copied()
    }

    /// Returns `true` if `coord` holds a height.
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.heights.contains_key(&coord)
    }

    /// Writes `value` at `coord` unconditionally and updates the extremes.
    pub fn set(&mut self, coord: GridCoord, value: f64) {
        self.heights.insert(coord, value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Writes the value produced by `value` only if `coord` is absent.
    ///
    /// `value` is not called for present coordinates. Returns whether it wrote.
    pub fn set_if_absent_with(&mut self, coord: GridCoord, value: impl FnOnce() -> f64) -> bool {
        if self.contains(coord) {
            return false;
        }
        self.set(coord, value());
        true
    }

    /// Smallest height ever written (`+inf` while empty).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest height ever written (`-inf` while empty).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(min, max)` once at least one height has been written.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        (self.min <= self.max).then_some((self.min, self.max))
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` if no sample has been stored.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Iterates over all stored `(coord, height)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, f64)> + '_ {
        self.heights.iter().map(|(c, h)| (*c, *h))
    }
}

impl Default for HeightField {
    fn default() -> Self {
        Self::new()
    }
}
