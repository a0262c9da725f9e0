//! Display seams: the [`Renderer`] the engine draws into and the
//! [`ColorScale`] that turns heights into colors.

mod color;
mod scale;

pub use color::Color;
pub use scale::{ColorScale, ScalePoint};

use crate::coord::GridCoord;

/// A drawing surface addressed in world grid coordinates.
pub trait Renderer {
    /// Inclusive `(min, max)` world corners currently visible.
    fn render_boundaries(&self) -> (GridCoord, GridCoord);

    /// Paints the sample at world `(x, y)`.
    fn set_point_color(&mut self, x: i64, y: i64, color: Color);
}

/// Renderer that records every painted point; handy for headless use.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    /// Inclusive lower-left corner of the viewport.
    pub min: GridCoord,
    /// Inclusive upper-right corner of the viewport.
    pub max: GridCoord,
    /// Painted points in call order.
    pub points: Vec<(i64, i64, Color)>,
}

impl RecordingRenderer {
    /// Creates a recorder for the viewport `min..=max`.
    pub fn new(min: GridCoord, max: GridCoord) -> Self {
        Self {
            min,
            max,
            points: Vec::new(),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn render_boundaries(&self) -> (GridCoord, GridCoord) {
        (self.min, self.max)
    }

    fn set_point_color(&mut self, x: i64, y: i64, color: Color) {
        self.points.push((x, y, color));
    }
}
