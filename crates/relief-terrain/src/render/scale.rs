//! Piecewise-linear mapping from heights to colors.

use crate::error::TerrainError;

use super::color::Color;

/// A height paired with the color it maps to exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    /// Height value.
    pub value: f64,
    /// Color at that height.
    pub color: Color,
}

impl ScalePoint {
    /// Creates a scale point.
    pub const fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }
}

/// Two heights closer than this are treated as the same scale point.
const EPSILON: f64 = 1e-5;

/// Monotonic color scale over sorted control points.
///
/// Values between two points are interpolated linearly per channel. Values
/// outside the defined range clamp to the endpoint colors.
#[derive(Clone, Debug)]
pub struct ColorScale {
    points: Vec<ScalePoint>,
    lookup: Vec<Color>,
}

impl ColorScale {
    /// Builds a scale from unordered points.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmptyColorScale`] if `points` is empty.
    pub fn new(mut points: Vec<ScalePoint>) -> Result<Self, TerrainError> {
        if points.is_empty() {
            return Err(TerrainError::EmptyColorScale);
        }
        points.sort_by(|a, b| a.value.total_cmp(&b.value));
        let mut scale = Self {
            points,
            lookup: Vec::new(),
        };
        scale.rebuild_lookup();
        Ok(scale)
    }

    /// Ocean-to-peak palette spanning `-60..=60`.
    pub fn terrain_default() -> Self {
        let stops = [
            (-60.0, Color::rgb(43, 24, 115)),
            (-50.0, Color::rgb(30, 51, 128)),
            (-40.0, Color::rgb(12, 63, 139)),
            (-30.0, Color::rgb(5, 80, 150)),
            (-20.0, Color::rgb(5, 106, 174)),
            (-10.0, Color::rgb(6, 124, 190)),
            (-5.0, Color::rgb(3, 150, 222)),
            (0.0, Color::rgb(0, 150, 0)),
            (5.0, Color::rgb(90, 185, 0)),
            (10.0, Color::rgb(100, 202, 0)),
            (20.0, Color::rgb(255, 203, 20)),
            (30.0, Color::rgb(252, 130, 20)),
            (40.0, Color::rgb(220, 60, 0)),
            (50.0, Color::rgb(180, 30, 0)),
            (60.0, Color::rgb(160, 0, 0)),
        ];
        let points = stops
            .into_iter()
            .map(|(value, color)| ScalePoint::new(value, color))
            .collect();
        Self::new(points).unwrap_or_else(|_| unreachable!("palette is non-empty"))
    }

    /// Sorted scale points.
    pub fn points(&self) -> &[ScalePoint] {
        &self.points
    }

    /// Lowest defined height.
    pub fn min(&self) -> f64 {
        self.points[0].value
    }

    /// Highest defined height.
    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1].value
    }

    /// Exact interpolated color for `value`.
    pub fn color(&self, value: f64) -> Color {
        let idx = self.points.partition_point(|p| p.value < value);
        if idx == 0 {
            return self.points[0].color;
        }
        if idx == self.points.len() {
            return self.points[idx - 1].color;
        }
        let upper = self.points[idx];
        if (value - upper.value).abs() < EPSILON {
            return upper.color;
        }
        let lower = self.points[idx - 1];
        let t = (value - lower.value) / (upper.value - lower.value);
        let delta = lower.color.difference(upper.color).map(|d| d * t);
        lower.color.increased(delta)
    }

    /// Color from the per-unit lookup table built at construction.
    ///
    /// Heights are floored to whole units, so this trades accuracy for a
    /// single index per sample.
    pub fn fast_color(&self, value: f64) -> Color {
        let min = self.min();
        if value <= min {
            return self.lookup[0];
        }
        if value >= self.max() {
            return self.lookup[self.lookup.len() - 1];
        }
        let idx = (value.floor() - min.floor()) as usize;
        self.lookup[idx.min(self.lookup.len() - 1)]
    }

    /// Multiplies every point's height by `factor` and rebuilds the table.
    pub fn scale_values(&mut self, factor: f64) {
        for point in &mut self.points {
            point.value *= factor;
        }
        self.points.sort_by(|a, b| a.value.total_cmp(&b.value));
        self.rebuild_lookup();
    }

    fn rebuild_lookup(&mut self) {
        let min = self.min().floor();
        let span = (self.max() - self.min()).max(0.0).floor() as usize;
        self.lookup = (0..=span).map(|k| self.color(min + k as f64)).collect();
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::terrain_default()
    }
}
