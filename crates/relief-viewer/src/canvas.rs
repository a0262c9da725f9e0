//! Raster canvas that the engine paints into and that saves as PNG.

use std::path::Path;

use glam::IVec2;
use image::{Rgba, RgbaImage};
use relief_terrain::{Color, ColorScale, GridCoord, Renderer};

/// Legend swatch size in pixels.
const SWATCH_WIDTH: u32 = 30;
const SWATCH_HEIGHT: u32 = 15;
const LEGEND_MARGIN: u32 = 6;
const LEGEND_WIDTH: u32 = 60;

/// Errors produced while writing the canvas to disk.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Encoding or writing the image failed.
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),
}

/// An RGBA image with a pan offset, addressed in world grid coordinates.
///
/// World `y` points up; pixel rows grow downwards.
pub struct Canvas {
    image: RgbaImage,
    offset: IVec2,
}

impl Canvas {
    /// Create a white, unpanned canvas of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(Color::WHITE.to_array())),
            offset: IVec2::ZERO,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Pan the view by `delta` samples.
    pub fn translate(&mut self, delta: IVec2) {
        self.offset += delta;
    }

    pub fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset;
    }

    /// Fill the whole canvas with `background`.
    pub fn clear(&mut self, background: Color) {
        let pixel = Rgba(background.to_array());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Pixel position of world `(x, y)`, or `None` when it falls outside the image.
    pub fn to_pixel(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let px = i64::from(self.offset.x).checked_add(x)?;
        let py = i64::from(self.height()).checked_sub(i64::from(self.offset.y).checked_add(y)?)?;
        let px = u32::try_from(px).ok().filter(|&px| px < self.width())?;
        let py = u32::try_from(py).ok().filter(|&py| py < self.height())?;
        Some((px, py))
    }

    /// Color of the pixel at image position `(px, py)`.
    pub fn pixel(&self, px: u32, py: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(px, py)
            .map(|Rgba([r, g, b, a])| Color::rgba(*r, *g, *b, *a))
    }

    /// Draw the scale's color stops in the top-left corner, lowest at the bottom.
    pub fn draw_legend(&mut self, scale: &ColorScale) {
        let count = scale.points().len() as u32;
        let panel_height = count * (SWATCH_HEIGHT + 1) + LEGEND_MARGIN * 2;
        self.fill_rect(1, 1, LEGEND_WIDTH, panel_height, Color::WHITE);

        for (index, point) in scale.points().iter().enumerate() {
            let row = count - index as u32 - 1;
            self.fill_rect(
                LEGEND_MARGIN,
                LEGEND_MARGIN + row * (SWATCH_HEIGHT + 1),
                SWATCH_WIDTH,
                SWATCH_HEIGHT,
                point.color,
            );
        }
    }

    /// Write the canvas as a PNG file.
    pub fn save(&self, path: &Path) -> Result<(), CanvasError> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let pixel = Rgba(color.to_array());
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }
}

impl Renderer for Canvas {
    fn render_boundaries(&self) -> (GridCoord, GridCoord) {
        let x = i64::from(self.offset.x);
        let y = i64::from(self.offset.y);
        (
            GridCoord::new(-x, -y),
            GridCoord::new(-x + i64::from(self.width()), -y + i64::from(self.height())),
        )
    }

    fn set_point_color(&mut self, x: i64, y: i64, color: Color) {
        if let Some((px, py)) = self.to_pixel(x, y) {
            self.image.put_pixel(px, py, Rgba(color.to_array()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_canvas_dimensions() {
        let canvas = Canvas::new(40, 20);
        assert_eq!((canvas.width(), canvas.height()), (40, 20));
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_y_axis_points_up() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_point_color(3, 1, RED);
        assert_eq!(canvas.pixel(3, 9), Some(RED), "y=1 lands on the bottom row");
    }

    #[test]
    fn test_offset_shifts_points() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_offset(IVec2::new(2, 3));
        canvas.set_point_color(-2, 7, RED);
        assert_eq!(canvas.to_pixel(-2, 7), Some((0, 0)));
        assert_eq!(canvas.pixel(0, 0), Some(RED));
    }

    #[test]
    fn test_out_of_bounds_points_dropped() {
        let mut canvas = Canvas::new(8, 8);
        for (x, y) in [(-1, 4), (8, 4), (4, 0), (4, 9), (i64::MAX, 0)] {
            assert_eq!(canvas.to_pixel(x, y), None, "({x}, {y}) should be outside");
            canvas.set_point_color(x, y, RED);
        }
        assert!(canvas.image().pixels().all(|p| p.0 == Color::WHITE.to_array()));
    }

    #[test]
    fn test_render_boundaries_follow_offset() {
        let mut canvas = Canvas::new(100, 50);
        assert_eq!(
            canvas.render_boundaries(),
            (GridCoord::new(0, 0), GridCoord::new(100, 50))
        );

        canvas.translate(IVec2::new(10, -5));
        canvas.translate(IVec2::new(5, 0));
        assert_eq!(canvas.offset(), IVec2::new(15, -5));
        assert_eq!(
            canvas.render_boundaries(),
            (GridCoord::new(-15, 5), GridCoord::new(85, 55))
        );

        canvas.set_offset(IVec2::ZERO);
        assert_eq!(canvas.render_boundaries().0, GridCoord::new(0, 0));
    }

    #[test]
    fn test_clear_fills_background() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(Color::BLACK);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_legend_stacks_lowest_at_bottom() {
        let mut canvas = Canvas::new(100, 300);
        canvas.clear(Color::BLACK);
        let scale = ColorScale::terrain_default();
        canvas.draw_legend(&scale);

        let points = scale.points();
        let count = points.len() as u32;
        let lowest_row = LEGEND_MARGIN + (count - 1) * (SWATCH_HEIGHT + 1);
        assert_eq!(canvas.pixel(LEGEND_MARGIN, lowest_row), Some(points[0].color));
        assert_eq!(
            canvas.pixel(LEGEND_MARGIN, LEGEND_MARGIN),
            Some(points[points.len() - 1].color)
        );
        // Panel background between swatch and panel edge.
        assert_eq!(canvas.pixel(LEGEND_WIDTH - 1, LEGEND_MARGIN), Some(Color::WHITE));
        // Outside the panel stays untouched.
        assert_eq!(canvas.pixel(LEGEND_WIDTH + 5, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_legend_clipped_on_small_canvas() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Color::BLACK);
        let scale = ColorScale::terrain_default();
        canvas.draw_legend(&scale);

        let top = scale.points().last().unwrap().color;
        assert_eq!(canvas.pixel(9, 9), Some(top), "Top swatch is cut at the canvas edge");
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE), "Panel starts at (1, 1)");
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let mut canvas = Canvas::new(16, 16);
        canvas.set_point_color(1, 1, RED);
        canvas.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (16, 16));
        assert_eq!(loaded.get_pixel(1, 15).0, RED.to_array());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(4, 4);
        let result = canvas.save(&dir.path().join("nope").join("map.png"));
        assert!(matches!(result, Err(CanvasError::Image(_))));
    }
}
