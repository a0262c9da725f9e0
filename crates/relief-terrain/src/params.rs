//! Generator parameters and control points.

use serde::{Deserialize, Serialize};

use crate::coord::GridCoord;
use crate::error::TerrainError;
use crate::random::RandomKind;

/// Largest accepted chunk exponent (`2^30` samples per side).
pub const MAX_CHUNK_EXPONENT: u32 = 30;

/// Parameters controlling chunked diamond-square generation.
#[derive(Clone, Debug, PartialEq)]
pub struct DiamondSquareParams {
    /// Side length of a chunk. Must be a positive power of two.
    pub chunk_size: i64,
    /// Height substituted for absent neighbors when averaging.
    pub outside_baseline: f64,
    /// Width of the median window used to smooth chunk edges.
    pub filter_window: u32,
    /// Roughness `R`: displacement is `R * h * random(-1, 1)` at half-step `h`.
    pub roughness: f64,
    /// Seed for the random source.
    pub seed: u64,
    /// Random source implementation.
    pub random: RandomKind,
}

impl Default for DiamondSquareParams {
    fn default() -> Self {
        Self {
            chunk_size: 64,
            outside_baseline: 0.0,
            filter_window: 3,
            roughness: 1.0,
            seed: 0,
            random: RandomKind::ChaCha,
        }
    }
}

impl DiamondSquareParams {
    /// Chunk size for `2^exponent`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ChunkExponentTooLarge`] above [`MAX_CHUNK_EXPONENT`].
    pub fn chunk_size_for_exponent(exponent: u32) -> Result<i64, TerrainError> {
        if exponent > MAX_CHUNK_EXPONENT {
            return Err(TerrainError::ChunkExponentTooLarge(exponent));
        }
        Ok(1_i64 << exponent)
    }

    /// Checks the parameters before any generation runs.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidChunkSize`] for a zero, negative or
    /// non-power-of-two chunk size, [`TerrainError::InvalidFilterWindow`] for a
    /// window wider than `2 * chunk_size + 1`, and
    /// [`TerrainError::NonFiniteParameter`] for NaN or infinite roughness /
    /// baseline.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let size = self.chunk_size;
        if size <= 0 || (size & (size - 1)) != 0 {
            return Err(TerrainError::InvalidChunkSize(size));
        }
        if size > 1_i64 << MAX_CHUNK_EXPONENT {
            return Err(TerrainError::InvalidChunkSize(size));
        }
        let max_window = 2 * size + 1;
        if i64::from(self.filter_window) > max_window {
            return Err(TerrainError::InvalidFilterWindow {
                window: self.filter_window,
                chunk_size: size,
                max: max_window,
            });
        }
        for (name, value) in [
            ("roughness", self.roughness),
            ("outside_baseline", self.outside_baseline),
        ] {
            if !value.is_finite() {
                return Err(TerrainError::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }
}

/// A height fixed before generation. Generation never overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Grid X coordinate.
    pub x: i64,
    /// Grid Y coordinate.
    pub y: i64,
    /// Height at `(x, y)`.
    pub height: f64,
}

impl ControlPoint {
    /// Creates a control point.
    pub fn new(x: i64, y: i64, height: f64) -> Self {
        Self { x, y, height }
    }

    /// Grid position of this point.
    pub fn coord(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }
}
