//! Terrain error types.

/// Errors raised while configuring the generator or its display helpers.
///
/// Generation itself has no failure paths; every variant here is a
/// configuration-time problem.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TerrainError {
    /// Chunk size is zero, negative, or not a power of two.
    #[error("chunk size must be a positive power of two, got {0}")]
    InvalidChunkSize(i64),

    /// `2^exponent` exceeds the largest supported chunk size.
    #[error("chunk exponent {0} is too large (max {max})", max = crate::params::MAX_CHUNK_EXPONENT)]
    ChunkExponentTooLarge(u32),

    /// The median window is wider than two chunks plus the edge line.
    #[error("filter window {window} is too wide for chunk size {chunk_size} (max {max})")]
    InvalidFilterWindow {
        /// Requested window width.
        window: u32,
        /// Chunk size the window was checked against.
        chunk_size: i64,
        /// Widest accepted window.
        max: i64,
    },

    /// A floating-point parameter is NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A color scale was built without any points.
    #[error("color scale needs at least one point")]
    EmptyColorScale,

    /// A color string could not be parsed.
    #[error("invalid color string: {0:?}")]
    InvalidColor(String),
}
