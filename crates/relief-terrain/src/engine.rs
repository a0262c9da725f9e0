//! Composition root: lazy chunk generation driven by viewport traversal.
//!
//! The [`Engine`] owns the height field and the random source. Samples are
//! generated on first observation: reading an absent coordinate during
//! [`Engine::draw`] generates its chunk (and that chunk's neighbors) inline.

use std::time::{Duration, Instant};

use crate::chunk::ChunkGenerator;
use crate::coord::{ChunkOrigin, GridCoord};
use crate::error::TerrainError;
use crate::filter::BoundaryFilter;
use crate::height_field::HeightField;
use crate::params::{ControlPoint, DiamondSquareParams};
use crate::random::RandomSource;
use crate::render::{ColorScale, Renderer};
use crate::stitch::{SeamStitcher, Stitching};

/// Summary of one [`Engine::draw`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawStats {
    /// Points forwarded to the renderer.
    pub points_drawn: usize,
    /// Chunk generations run during the pass, neighbors included.
    pub chunks_generated: usize,
    /// Wall time spent in the pass.
    pub elapsed: Duration,
}

/// Chunked diamond-square height field generator.
pub struct Engine {
    params: DiamondSquareParams,
    field: HeightField,
    rng: Box<dyn RandomSource>,
    generator: ChunkGenerator,
    stitcher: SeamStitcher,
    filter: BoundaryFilter,
    generated_chunks: usize,
}

impl Engine {
    /// Creates an engine with the random source selected by `params.random`.
    ///
    /// Control points are written before any generation and are never
    /// overwritten by it.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] if `params` fails validation.
    pub fn new(
        params: DiamondSquareParams,
        control_points: &[ControlPoint],
    ) -> Result<Self, TerrainError> {
        let rng = params.random.build(params.seed);
        Self::with_random(params, control_points, rng)
    }

    /// Creates an engine drawing from a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] if `params` fails validation.
    pub fn with_random(
        params: DiamondSquareParams,
        control_points: &[ControlPoint],
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, TerrainError> {
        params.validate()?;

        let mut field = HeightField::new();
        for point in control_points {
            field.set(point.coord(), point.height);
        }
        tracing::debug!(
            chunk_size = params.chunk_size,
            control_points = control_points.len(),
            "Created height field engine"
        );

        Ok(Self {
            generator: ChunkGenerator::new(&params),
            stitcher: SeamStitcher::new(params.chunk_size),
            filter: BoundaryFilter::new(params.chunk_size, params.filter_window),
            params,
            field,
            rng,
            generated_chunks: 0,
        })
    }

    /// Height at `(x, y)`, or `None` if it has not been generated.
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        self.field.get(GridCoord::new(x, y))
    }

    /// Origin of the chunk owning `(x, y)`.
    pub fn chunk_origin(&self, x: i64, y: i64) -> ChunkOrigin {
        ChunkOrigin::containing(GridCoord::new(x, y), self.params.chunk_size)
    }

    /// Generates the chunk at `(origin_x, origin_y)` with seam stitching.
    ///
    /// Unaligned coordinates are snapped to the chunk that contains them.
    pub fn generate_chunk(&mut self, origin_x: i64, origin_y: i64) {
        let origin = self.chunk_origin(origin_x, origin_y);
        self.generate(origin, Stitching::Enabled);
    }

    /// Generates one chunk; with stitching enabled, also its missing
    /// neighbors (without further stitching) followed by edge smoothing.
    fn generate(&mut self, origin: ChunkOrigin, stitching: Stitching) {
        let written = self
            .generator
            .generate(&mut self.field, self.rng.as_mut(), origin);
        self.generated_chunks += 1;
        tracing::debug!(
            x = origin.x(),
            y = origin.y(),
            written,
            ?stitching,
            "Generated chunk"
        );

        if stitching == Stitching::Enabled {
            for probe in self.stitcher.probes(origin) {
                if !self.field.contains(probe) {
                    let neighbor = self.stitcher.owner(probe);
                    self.generate(neighbor, Stitching::Disabled);
                }
            }
            self.filter.smooth_chunk(&mut self.field, origin);
        }
    }

    /// Generates the square of chunks covering `0..extent` on both axes
    /// without stitching, then smooths every one of their boundaries.
    ///
    /// Returns the number of chunks generated.
    pub fn pregenerate(&mut self, extent: u32) -> usize {
        let size = self.params.chunk_size;
        let count = (i64::from(extent) + size - 1) / size;
        let origins: Vec<ChunkOrigin> = (0..count)
            .flat_map(|i| (0..count).map(move |j| (i * size, j * size)))
            .map(|(x, y)| ChunkOrigin(GridCoord::new(x, y)))
            .collect();

        for &origin in &origins {
            self.generate(origin, Stitching::Disabled);
        }
        for &origin in &origins {
            self.filter.smooth_chunk(&mut self.field, origin);
        }
        tracing::info!(chunks = origins.len(), extent, "Pregenerated region");
        origins.len()
    }

    /// Paints every point of the renderer's viewport, generating on demand.
    ///
    /// Absent samples trigger top-level generation of their chunk; the value
    /// is forwarded to the renderer once present.
    pub fn draw<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        scale: &ColorScale,
    ) -> DrawStats {
        let start = Instant::now();
        let chunks_before = self.generated_chunks;
        let (min, max) = renderer.render_boundaries();
        let mut points_drawn = 0;

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let coord = GridCoord::new(x, y);
                if !self.field.contains(coord) {
                    let origin = ChunkOrigin::containing(coord, self.params.chunk_size);
                    self.generate(origin, Stitching::Enabled);
                }
                if let Some(height) = self.field.get(coord) {
                    renderer.set_point_color(x, y, scale.fast_color(height));
                    points_drawn += 1;
                }
            }
        }

        let stats = DrawStats {
            points_drawn,
            chunks_generated: self.generated_chunks - chunks_before,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            points = stats.points_drawn,
            chunks = stats.chunks_generated,
            elapsed_ms = stats.elapsed.as_secs_f64() * 1000.0,
            "Draw pass complete"
        );
        stats
    }

    /// The underlying height field.
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Parameters the engine was built with.
    pub fn params(&self) -> &DiamondSquareParams {
        &self.params
    }

    /// Global `(min, max)` over every height written so far.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        self.field.extremes()
    }

    /// Total chunk generations run, neighbors included.
    pub fn generated_chunks(&self) -> usize {
        self.generated_chunks
    }
}
