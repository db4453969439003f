//! LED strip driver trait

use smart_leds::RGB8;

/// Errors that can occur driving the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// Pixel index beyond the end of the strip
    IndexOutOfRange,
    /// Pushing the display buffer out to the LEDs failed
    Transfer,
}

/// Trait for an addressable LED strip with a drawing and a display buffer
///
/// `set_pixel` only touches the drawing buffer. Nothing reaches the LEDs
/// until `show`, which copies drawing to display and latches it out.
pub trait StripDriver {
    /// Bring the driver up
    fn initialize(&mut self) -> Result<(), StripError>;

    /// Write one pixel into the drawing buffer
    fn set_pixel(&mut self, index: usize, red: u8, green: u8, blue: u8) -> Result<(), StripError>;

    /// Transfer drawing to display and update the LEDs
    fn show(&mut self) -> Result<(), StripError>;

    /// Number of addressable pixels
    fn pixel_count(&self) -> usize;
}

/// Helper methods for strip drivers
pub trait StripExt: StripDriver {
    /// Set a pixel from a color value
    fn set_color(&mut self, index: usize, color: RGB8) -> Result<(), StripError> {
        self.set_pixel(index, color.r, color.g, color.b)
    }

    /// Set every pixel in the drawing buffer to `color`
    fn fill(&mut self, color: RGB8) -> Result<(), StripError> {
        for index in 0..self.pixel_count() {
            self.set_color(index, color)?;
        }
        Ok(())
    }
}

// Blanket implementation for all StripDriver types
impl<T: StripDriver> StripExt for T {}
