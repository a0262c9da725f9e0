//! Diamond-square subdivision of a single chunk.
//!
//! A chunk of side `S` is filled by seeding its four corners and then
//! alternating square and diamond passes with the half-step `h` shrinking
//! from `S / 2` to `1`. Every write is guarded by absence, so running the
//! generator over a partially filled chunk resumes without touching the
//! samples that are already there.

use crate::coord::{ChunkOrigin, GridCoord};
use crate::height_field::HeightField;
use crate::params::DiamondSquareParams;
use crate::random::RandomSource;

/// Lower bound of the range corner heights are drawn from.
const CORNER_MIN: f64 = -50.0;
/// Upper bound of the range corner heights are drawn from.
const CORNER_MAX: f64 = 50.0;

/// Fills chunks of a fixed size using diamond-square subdivision.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    chunk_size: i64,
    outside_baseline: f64,
    roughness: f64,
}

impl ChunkGenerator {
    /// Creates a generator from validated parameters.
    pub fn new(params: &DiamondSquareParams) -> Self {
        Self {
            chunk_size: params.chunk_size,
            outside_baseline: params.outside_baseline,
            roughness: params.roughness,
        }
    }

    /// Side length of the chunks this generator fills.
    pub fn chunk_size(&self) -> i64 {
        self.chunk_size
    }

    /// Seeds the corners and subdivides the chunk at `origin`.
    ///
    /// Returns the number of samples written.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        origin: ChunkOrigin,
    ) -> usize {
        self.seed_corners(field, rng, origin) + self.subdivide(field, rng, origin)
    }

    /// Assigns a random height to every absent corner of the chunk.
    ///
    /// Each height comes from a nested draw: a lower bound in `[-50, 0)` and
    /// an upper bound in `[0, 50)` are drawn first, then the height between
    /// them. Corners that already exist are left alone.
    pub fn seed_corners<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        origin: ChunkOrigin,
    ) -> usize {
        let mut written = 0;
        for corner in origin.corners(self.chunk_size) {
            let wrote = field.set_if_absent_with(corner, || {
                let low = rng.random_float(CORNER_MIN, 0.0);
                let high = rng.random_float(0.0, CORNER_MAX);
                rng.random_float(low, high)
            });
            written += usize::from(wrote);
        }
        written
    }

    /// Runs the square and diamond passes for every half-step down to 1.
    pub fn subdivide<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        origin: ChunkOrigin,
    ) -> usize {
        let mut written = 0;
        let mut step = self.chunk_size;
        while step > 1 {
            let half = step / 2;
            written += self.square_pass(field, rng, origin, half);
            written += self.diamond_pass(field, rng, origin, half);
            step = half;
        }
        written
    }

    /// Fills the centers of every `2h` square from their diagonal neighbors.
    fn square_pass<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        origin: ChunkOrigin,
        half: i64,
    ) -> usize {
        let (x0, y0, s) = (origin.x(), origin.y(), self.chunk_size);
        let stride = (half * 2) as usize;
        let mut written = 0;
        for x in (x0 + half..=x0 + s).step_by(stride) {
            for y in (y0 + half..=y0 + s).step_by(stride) {
                let neighbors = [
                    GridCoord::new(x - half, y - half),
                    GridCoord::new(x - half, y + half),
                    GridCoord::new(x + half, y - half),
                    GridCoord::new(x + half, y + half),
                ];
                let coord = GridCoord::new(x, y);
                written += usize::from(self.displace(field, rng, coord, &neighbors, half));
            }
        }
        written
    }

    /// Fills the edge midpoints of every `2h` square from their axis neighbors.
    ///
    /// Columns alternate between starting at `y0 + h` and `y0`, which visits
    /// exactly the points the square pass left behind.
    fn diamond_pass<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        origin: ChunkOrigin,
        half: i64,
    ) -> usize {
        let (x0, y0, s) = (origin.x(), origin.y(), self.chunk_size);
        let stride = (half * 2) as usize;
        let mut written = 0;
        for (column, x) in (x0..=x0 + s).step_by(half as usize).enumerate() {
            let start = if column % 2 == 0 { y0 + half } else { y0 };
            for y in (start..=y0 + s).step_by(stride) {
                let neighbors = [
                    GridCoord::new(x - half, y),
                    GridCoord::new(x, y - half),
                    GridCoord::new(x + half, y),
                    GridCoord::new(x, y + half),
                ];
                let coord = GridCoord::new(x, y);
                written += usize::from(self.displace(field, rng, coord, &neighbors, half));
            }
        }
        written
    }

    /// Writes `mean(neighbors) + R * h * random(-1, 1)` at `coord` if it is absent.
    ///
    /// No random value is drawn for coordinates that already hold a height.
    fn displace<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
        coord: GridCoord,
        neighbors: &[GridCoord; 4],
        half: i64,
    ) -> bool {
        let mean = self.average(field, neighbors);
        let amplitude = self.roughness * half as f64;
        field.set_if_absent_with(coord, || mean + amplitude * rng.random_float(-1.0, 1.0))
    }

    /// Mean of the neighbor heights, substituting the outside baseline for gaps.
    fn average(&self, field: &HeightField, neighbors: &[GridCoord; 4]) -> f64 {
        let sum: f64 = neighbors
            .iter()
            .map(|&n| field.get(n).unwrap_or(self.outside_baseline))
            .sum();
        sum / neighbors.len() as f64
    }
}
