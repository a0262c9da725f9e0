//! Neighbor ordering that keeps shared chunk edges consistent.
//!
//! Chunks share their edge and corner samples with their neighbors. Before a
//! requested chunk is finalised, the eight chunks around it are generated so
//! that every shared sample is fixed once and read identically from both
//! sides. Neighbor generation never stitches again, which caps the cascade
//! at one hop.

use crate::coord::{ChunkOrigin, GridCoord};

/// Whether a chunk generation may trigger generation of its neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stitching {
    /// Top-level request: generate missing neighbors, then smooth edges.
    Enabled,
    /// Neighbor-triggered request: generate this chunk only.
    Disabled,
}

/// Locates the neighbors of a chunk that still need generating.
#[derive(Clone, Copy, Debug)]
pub struct SeamStitcher {
    chunk_size: i64,
}

impl SeamStitcher {
    /// Creates a stitcher for chunks of side `chunk_size`.
    pub fn new(chunk_size: i64) -> Self {
        Self { chunk_size }
    }

    /// Probe coordinates inside each of the eight surrounding chunks.
    ///
    /// Each probe lies half a chunk beyond the shared edge, i.e. at the centre
    /// of the neighbor, so it is absent exactly when that neighbor's interior
    /// has not been generated. Order: north-west, north, north-east, east,
    /// south-east, south, south-west, west.
    pub fn probes(&self, origin: ChunkOrigin) -> [GridCoord; 8] {
        let s = self.chunk_size;
        let half = s / 2;
        let o = origin.0;
        [
            o.offset(-half, half + s),
            o.offset(half, half + s),
            o.offset(half + s, half + s),
            o.offset(half + s, half),
            o.offset(half + s, -half),
            o.offset(half, -half),
            o.offset(-half, -half),
            o.offset(-half, half),
        ]
    }

    /// Origin of the chunk a probe falls into.
    pub fn owner(&self, probe: GridCoord) -> ChunkOrigin {
        ChunkOrigin::containing(probe, self.chunk_size)
    }

    /// Origins of the eight neighbor chunks, in probe order.
    pub fn neighbors(&self, origin: ChunkOrigin) -> [ChunkOrigin; 8] {
        self.probes(origin).map(|probe| self.owner(probe))
    }
}
