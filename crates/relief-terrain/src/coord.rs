//! Integer grid coordinates and chunk addressing.

/// A sample position on the unbounded height grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Grid X coordinate.
    pub x: i64,
    /// Grid Y coordinate (grows upward when rendered).
    pub y: i64,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate offset by `(dx, dy)`.
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i64, i64)> for GridCoord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Lower-left corner of a chunk. Both axes are multiples of the chunk size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkOrigin(pub GridCoord);

impl ChunkOrigin {
    /// Returns the origin of the chunk that owns `coord`.
    ///
    /// Each axis is floored to the nearest lower multiple of `chunk_size`,
    /// so negative coordinates resolve to the chunk on their lower side.
    pub fn containing(coord: GridCoord, chunk_size: i64) -> Self {
        Self(GridCoord::new(
            coord.x.div_euclid(chunk_size) * chunk_size,
            coord.y.div_euclid(chunk_size) * chunk_size,
        ))
    }

    /// Origin X coordinate.
    pub fn x(self) -> i64 {
        self.0.x
    }

    /// Origin Y coordinate.
    pub fn y(self) -> i64 {
        self.0.y
    }

    /// The four corners of a chunk of side `chunk_size`, in seeding order:
    /// lower-left, upper-left, lower-right, upper-right.
    pub fn corners(self, chunk_size: i64) -> [GridCoord; 4] {
        let o = self.0;
        [
            o,
            o.offset(0, chunk_size),
            o.offset(chunk_size, 0),
            o.offset(chunk_size, chunk_size),
        ]
    }
}
