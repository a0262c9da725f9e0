//! Raster output for the relief heightmap generator.

mod canvas;

pub use canvas::{Canvas, CanvasError};
