//! Median smoothing along chunk edges.
//!
//! Independently generated chunks meet at edges whose two sides were
//! displaced with unrelated noise. After a chunk and its neighbors exist, a
//! band of `floor(w / 2)` samples on each side of every edge, and the edge
//! itself, are replaced by the median of their `w x w` window. Updates are
//! applied in place, so later windows see earlier results.
//!
//! This is the only place that overwrites existing heights.

use crate::coord::{ChunkOrigin, GridCoord};
use crate::height_field::HeightField;

/// Median of `values`; the mean of the two central values for an even count
/// and `0` for an empty slice. Sorts `values` in place.
pub fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let half = values.len() / 2;
    if values.len() % 2 == 1 {
        values[half]
    } else {
        (values[half - 1] + values[half]) / 2.0
    }
}

/// Orientation of a chunk edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    /// Row `y = line`, spanning one chunk in X.
    Horizontal,
    /// Column `x = line`, spanning one chunk in Y.
    Vertical,
}

/// Sliding-window median filter applied to chunk boundaries.
#[derive(Clone, Debug)]
pub struct BoundaryFilter {
    chunk_size: i64,
    window: u32,
    samples: Vec<f64>,
}

impl BoundaryFilter {
    /// Creates a filter for chunks of side `chunk_size` with window width `window`.
    pub fn new(chunk_size: i64, window: u32) -> Self {
        Self {
            chunk_size,
            window,
            samples: Vec::new(),
        }
    }

    /// Half-width of the window.
    fn half(&self) -> i64 {
        i64::from(self.window / 2)
    }

    /// Smooths the bottom, top, left and right edges of the chunk at `origin`.
    pub fn smooth_chunk(&mut self, field: &mut HeightField, origin: ChunkOrigin) {
        let (x, y, s) = (origin.x(), origin.y(), self.chunk_size);
        self.smooth_edge(field, Edge::Horizontal, y, x);
        self.smooth_edge(field, Edge::Horizontal, y + s, x);
        self.smooth_edge(field, Edge::Vertical, x, y);
        self.smooth_edge(field, Edge::Vertical, x + s, y);
        tracing::trace!(x, y, "Smoothed chunk boundary");
    }

    /// Smooths one edge lying on `line`, spanning `start..=start + chunk_size`.
    ///
    /// For each interior position along the edge, the band on the lower side
    /// is processed moving toward the edge, then the band on the upper side
    /// moving toward the edge. The edge line itself, endpoints included, is
    /// processed last.
    fn smooth_edge(&mut self, field: &mut HeightField, edge: Edge, line: i64, start: i64) {
        let half = self.half();
        let at = |along: i64, across: i64| match edge {
            Edge::Horizontal => GridCoord::new(along, across),
            Edge::Vertical => GridCoord::new(across, along),
        };

        for along in start + 1..start + self.chunk_size {
            for across in line - half..line {
                self.replace_with_median(field, at(along, across));
            }
            for across in (line + 1..=line + half).rev() {
                self.replace_with_median(field, at(along, across));
            }
        }
        for along in start..=start + self.chunk_size {
            self.replace_with_median(field, at(along, line));
        }
    }

    fn replace_with_median(&mut self, field: &mut HeightField, coord: GridCoord) {
        let value = self.window_median(field, coord);
        field.set(coord, value);
    }

    /// Median of all present samples in the window centred on `centre`.
    ///
    /// Absent coordinates are excluded rather than substituted.
    pub fn window_median(&mut self, field: &HeightField, centre: GridCoord) -> f64 {
        let half = self.half();
        self.samples.clear();
        for x in centre.x - half..=centre.x + half {
            for y in centre.y - half..=centre.y + half {
                if let Some(h) = field.get(GridCoord::new(x, y)) {
                    self.samples.push(h);
                }
            }
        }
        median(&mut self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_field(value: f64, from: i64, to: i64) -> HeightField {
        let mut field = HeightField::new();
        for x in from..=to {
            for y in from..=to {
                field.set(GridCoord::new(x, y), value);
            }
        }
        field
    }

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_empty_is_zero() {
        assert_eq!(median(&mut []), 0.0);
    }

    #[test]
    fn test_window_median_excludes_absent() {
        // Four of the nine samples around (0, 0) exist.
        let mut field = HeightField::new();
        field.set(GridCoord::new(-1, -1), 1.0);
        field.set(GridCoord::new(1, -1), 2.0);
        field.set(GridCoord::new(-1, 1), 3.0);
        field.set(GridCoord::new(1, 1), 4.0);
        let mut filter = BoundaryFilter::new(4, 3);
        assert_eq!(filter.window_median(&field, GridCoord::new(0, 0)), 2.5);
    }

    #[test]
    fn test_boundary_write_uses_window_median() {
        let mut field = HeightField::new();
        field.set(GridCoord::new(-1, -1), 1.0);
        field.set(GridCoord::new(1, -1), 2.0);
        field.set(GridCoord::new(-1, 1), 3.0);
        field.set(GridCoord::new(1, 1), 4.0);
        let mut filter = BoundaryFilter::new(4, 3);
        filter.replace_with_median(&mut field, GridCoord::new(0, 0));
        assert_eq!(field.get(GridCoord::new(0, 0)), Some(2.5));
    }

    #[test]
    fn test_uniform_field_unchanged() {
        let mut field = uniform_field(7.25, -4, 12);
        let mut filter = BoundaryFilter::new(8, 5);
        filter.smooth_chunk(&mut field, ChunkOrigin(GridCoord::new(0, 0)));
        for (coord, height) in field.iter() {
            assert_eq!(height, 7.25, "Uniform input changed at {coord:?}");
        }
    }

    #[test]
    fn test_spike_on_edge_removed() {
        let mut field = uniform_field(1.0, -4, 12);
        field.set(GridCoord::new(4, 0), 500.0);
        let mut filter = BoundaryFilter::new(8, 3);
        filter.smooth_chunk(&mut field, ChunkOrigin(GridCoord::new(0, 0)));
        assert_eq!(field.get(GridCoord::new(4, 0)), Some(1.0));
        assert_eq!(field.max(), 500.0, "Extremes remember the overwritten spike");
    }

    #[test]
    fn test_only_band_around_edges_touched() {
        let mut field = uniform_field(1.0, -4, 12);
        // Interior point far from every edge.
        field.set(GridCoord::new(4, 4), 99.0);
        let mut filter = BoundaryFilter::new(8, 3);
        filter.smooth_chunk(&mut field, ChunkOrigin(GridCoord::new(0, 0)));
        assert_eq!(field.get(GridCoord::new(4, 4)), Some(99.0));
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let mut field = HeightField::new();
        for x in 0..=4 {
            for y in 0..=4 {
                field.set(GridCoord::new(x, y), (x * 10 + y) as f64);
            }
        }
        let snapshot = field.clone();
        let mut filter = BoundaryFilter::new(4, 1);
        filter.smooth_chunk(&mut field, ChunkOrigin(GridCoord::new(0, 0)));
        for (coord, height) in snapshot.iter() {
            assert_eq!(field.get(coord), Some(height));
        }
    }
}
