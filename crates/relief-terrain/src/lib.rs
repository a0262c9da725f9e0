//! Unbounded 2D height fields from chunked diamond-square subdivision.
//!
//! Chunks are generated lazily, stitched to their neighbors so shared edges
//! agree, and smoothed along their boundaries with a median filter.

mod chunk;
mod coord;
mod engine;
mod error;
mod filter;
mod height_field;
mod params;
mod random;
mod stitch;

pub mod render;

pub use chunk::ChunkGenerator;
pub use coord::{ChunkOrigin, GridCoord};
pub use engine::{DrawStats, Engine};
pub use error::TerrainError;
pub use filter::{BoundaryFilter, median};
pub use height_field::HeightField;
pub use params::{ControlPoint, DiamondSquareParams, MAX_CHUNK_EXPONENT};
pub use random::{RandomKind, RandomSource, SeededRandom, SineRandom};
pub use render::{Color, ColorScale, RecordingRenderer, Renderer, ScalePoint};
pub use stitch::{SeamStitcher, Stitching};
