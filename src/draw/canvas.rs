//! Owned raster target that strokes are painted onto.

use super::color::Color;
use super::drawing::Drawing;
use super::point::StrokePoint;
use super::render;

/// ARGB32 image surface holding the painted pixels.
///
/// The front-end never draws strokes itself: it blits this surface and overlays
/// UI on top, so the canvas content is exactly what gets exported.
pub struct Canvas {
    surface: cairo::ImageSurface,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, cairo::Error> {
        let width = width.max(1);
        let height = height.max(1);
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let canvas = Self {
            surface,
            width,
            height,
        };
        let ctx = cairo::Context::new(&canvas.surface)?;
        render::render_background(&ctx, background)?;
        Ok(canvas)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Backing surface, for blitting onto the screen buffer.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Clears to `background` and replays the full history. Returns the segment count.
    pub fn replay(&mut self, drawing: &Drawing, background: Color) -> Result<usize, cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        render::replay(&ctx, drawing, background)
    }

    /// Paints one segment incrementally.
    pub fn paint_segment(
        &mut self,
        from: &StrokePoint,
        to: &StrokePoint,
        background: Color,
    ) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        render::render_segment(&ctx, from, to, background)
    }

    /// Reads one pixel as straight (non-premultiplied) RGBA.
    pub fn pixel_rgba(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;

        let mut pixel = None;
        self.surface
            .with_data(|data| {
                pixel = data.get(offset..offset + 4).map(unpremultiply);
            })
            .ok()?;
        pixel
    }

    /// Copies the pixels into a tightly packed RGB8 buffer (alpha dropped).
    pub fn to_rgb8(&self) -> Result<Vec<u8>, cairo::BorrowError> {
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let width = self.width as usize;
        let height = self.height as usize;

        let mut rgb = Vec::with_capacity(width * height * 3);
        self.surface.with_data(|data| {
            for row in data.chunks(stride).take(height) {
                for bytes in row[..width * 4].chunks_exact(4) {
                    let [r, g, b, _] = unpremultiply(bytes);
                    rgb.extend_from_slice(&[r, g, b]);
                }
            }
        })?;
        Ok(rgb)
    }

    /// Encodes the canvas as PNG into `writer`.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> Result<(), cairo::IoError> {
        self.surface.write_to_png(writer)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Cairo stores ARGB32 as premultiplied native-endian words.
fn unpremultiply(bytes: &[u8]) -> [u8; 4] {
    let pixel = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let a = (pixel >> 24) & 0xff;
    let channel = |shift: u32| -> u8 {
        let value = (pixel >> shift) & 0xff;
        if a == 0 {
            0
        } else {
            ((value * 255 + a / 2) / a).min(255) as u8
        }
    };
    [channel(16), channel(8), channel(0), a as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, PURPLE, WHITE};

    #[test]
    fn new_canvas_is_filled_with_background() {
        let canvas = Canvas::new(4, 3, BLACK).unwrap();
        assert_eq!(canvas.pixel_rgba(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel_rgba(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel_rgba(4, 0), None);
    }

    #[test]
    fn painted_segment_changes_pixels() {
        let mut canvas = Canvas::new(20, 20, WHITE).unwrap();
        let from = StrokePoint::new(2.0, 10.0, 6.0, PURPLE, false);
        let to = StrokePoint::new(18.0, 10.0, 6.0, PURPLE, false);
        canvas.paint_segment(&from, &to, WHITE).unwrap();
        assert_eq!(canvas.pixel_rgba(10, 10), Some([0xA5, 0x1D, 0xAB, 255]));
        assert_eq!(canvas.pixel_rgba(10, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn rgb_buffer_is_tightly_packed() {
        let canvas = Canvas::new(3, 2, WHITE).unwrap();
        let rgb = canvas.to_rgb8().unwrap();
        assert_eq!(rgb.len(), 3 * 2 * 3);
        assert!(rgb.iter().all(|&b| b == 255));
    }

    #[test]
    fn zero_size_is_bumped_to_one_pixel() {
        let canvas = Canvas::new(0, 0, WHITE).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }
}
