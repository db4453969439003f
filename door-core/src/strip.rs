//! Double-buffered strip model
//!
//! [`DoubleBuffer`] is the memory side of a strip driver: a drawing buffer
//! that `set_pixel` writes and a display buffer that `show` overwrites in
//! one step. It implements [`StripDriver`] on its own, which makes it the
//! host-side stand-in for real LEDs; chip drivers wrap it and push
//! `display()` out to the hardware after each `show`.

use smart_leds::RGB8;

use crate::traits::{StripDriver, StripError};

/// Drawing and display pixel buffers for `N` LEDs
#[derive(Debug, Clone)]
pub struct DoubleBuffer<const N: usize> {
    drawing: [RGB8; N],
    display: [RGB8; N],
    shows: u32,
}

impl<const N: usize> Default for DoubleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DoubleBuffer<N> {
    /// Both buffers dark
    pub const fn new() -> Self {
        Self {
            drawing: [RGB8::new(0, 0, 0); N],
            display: [RGB8::new(0, 0, 0); N],
            shows: 0,
        }
    }

    /// Staged pixels not yet shown
    pub fn drawing(&self) -> &[RGB8; N] {
        &self.drawing
    }

    /// Pixels as last latched to the LEDs
    pub fn display(&self) -> &[RGB8; N] {
        &self.display
    }

    /// Number of `show` calls since creation
    pub fn show_count(&self) -> u32 {
        self.shows
    }
}

impl<const N: usize> StripDriver for DoubleBuffer<N> {
    fn initialize(&mut self) -> Result<(), StripError> {
        self.drawing = [RGB8::default(); N];
        self.display = [RGB8::default(); N];
        Ok(())
    }

    fn set_pixel(&mut self, index: usize, red: u8, green: u8, blue: u8) -> Result<(), StripError> {
        let slot = self
            .drawing
            .get_mut(index)
            .ok_or(StripError::IndexOutOfRange)?;
        *slot = RGB8::new(red, green, blue);
        Ok(())
    }

    fn show(&mut self) -> Result<(), StripError> {
        self.display = self.drawing;
        self.shows = self.shows.wrapping_add(1);
        Ok(())
    }

    fn pixel_count(&self) -> usize {
        N
    }
}
