//! Pixel renderer
//!
//! Turns a filled drawing buffer into `set_pixel` calls and, separately,
//! commits the strip. Keeping `render` and `commit` apart lets the caller
//! decide whether a frame is good enough to show.

use smart_leds::RGB8;

use crate::mapping::ChannelMapping;
use crate::traits::{StripDriver, StripError, StripExt};
use door_protocol::BYTES_PER_PIXEL;

/// Writes payloads to a strip driver through a channel mapping
pub struct PixelRenderer<S, M> {
    strip: S,
    mapping: M,
}

impl<S: StripDriver, M: ChannelMapping> PixelRenderer<S, M> {
    /// Create a renderer
    pub fn new(strip: S, mapping: M) -> Self {
        Self { strip, mapping }
    }

    /// Strip driver
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Mutable strip driver
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Release the strip driver
    pub fn into_inner(self) -> S {
        self.strip
    }

    /// Bring the strip up showing `idle` on every LED
    pub fn initialize(&mut self, idle: RGB8) -> Result<(), StripError> {
        self.strip.initialize()?;
        self.strip.fill(idle)?;
        self.strip.show()
    }

    /// Stage pixels `0..num_pixels` from `buffer` into the drawing buffer
    ///
    /// Pixels that `buffer` is too short to hold a full sample for are not
    /// touched.
    pub fn render(&mut self, buffer: &[u8], num_pixels: usize) -> Result<(), StripError> {
        let count = num_pixels.min(buffer.len() / BYTES_PER_PIXEL);
        for index in 0..count {
            let color = self.mapping.color(buffer, index);
            self.strip.set_pixel(index, color.r, color.g, color.b)?;
        }
        Ok(())
    }

    /// Latch the drawing buffer to the LEDs
    pub fn commit(&mut self) -> Result<(), StripError> {
        self.strip.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mapping;
    use crate::strip::DoubleBuffer;
    use door_protocol::ChannelOrder;

    #[test]
    fn test_initialize_shows_idle_color() {
        let mut renderer = PixelRenderer::new(DoubleBuffer::<40>::new(), Mapping::Grayscale);
        renderer.initialize(RGB8::new(4, 4, 4)).unwrap();

        let strip = renderer.strip();
        assert_eq!(strip.show_count(), 1);
        assert!(strip.display().iter().all(|&p| p == RGB8::new(4, 4, 4)));
    }

    #[test]
    fn test_render_does_not_show() {
        let mut renderer = PixelRenderer::new(DoubleBuffer::<2>::new(), Mapping::Grayscale);
        renderer.render(&[9, 8, 7, 6, 5, 4], 2).unwrap();

        let strip = renderer.strip();
        assert_eq!(strip.drawing(), &[RGB8::new(9, 9, 9), RGB8::new(8, 8, 8)]);
        assert_eq!(strip.display(), &[RGB8::default(); 2]);
        assert_eq!(strip.show_count(), 0);
    }

    #[test]
    fn test_render_then_commit() {
        let mapping = Mapping::Ordered(ChannelOrder::Rgb);
        let mut renderer = PixelRenderer::new(DoubleBuffer::<2>::new(), mapping);
        renderer.render(&[1, 2, 3, 4, 5, 6], 2).unwrap();
        renderer.commit().unwrap();

        assert_eq!(
            renderer.strip().display(),
            &[RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)]
        );
    }

    #[test]
    fn test_render_stops_at_buffer_end() {
        let mut renderer = PixelRenderer::new(DoubleBuffer::<4>::new(), Mapping::Grayscale);
        renderer.render(&[1, 2, 3], 4).unwrap();

        let drawing = renderer.strip().drawing();
        assert_eq!(drawing[0], RGB8::new(1, 1, 1));
        assert_eq!(drawing[1], RGB8::default());
    }

    #[test]
    fn test_render_past_strip_end_fails() {
        let mut renderer = PixelRenderer::new(DoubleBuffer::<1>::new(), Mapping::Grayscale);
        assert_eq!(
            renderer.render(&[0; 6], 2),
            Err(StripError::IndexOutOfRange)
        );
    }
}
