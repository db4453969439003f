//! Payload bytes to pixel colors
//!
//! The payload is laid out as three bytes per pixel, but how those bytes
//! become a color is left open. Two readings are in use:
//!
//! - [`Mapping::Grayscale`]: pixel `i` shows payload byte `i` on all three
//!   channels. Only the first N bytes of the 3 × N payload are consumed.
//!   This is what deployed units do today.
//! - [`Mapping::Ordered`]: pixel `i` is the three-byte sample at
//!   `3i..3i+3`, decoded in the given channel order.
//!
//! Which one a sender expects is not settled, so the choice is a config
//! value rather than baked into the renderer. Anything else can implement
//! [`ChannelMapping`] directly; closures work too.

use door_protocol::{ChannelOrder, BYTES_PER_PIXEL};
use smart_leds::RGB8;

/// Extract the color of one pixel from a payload
pub trait ChannelMapping {
    /// Color of pixel `index`
    ///
    /// `payload` is the full drawing buffer (3 × N bytes) and
    /// `index < N`.
    fn color(&self, payload: &[u8], index: usize) -> RGB8;
}

impl<F> ChannelMapping for F
where
    F: Fn(&[u8], usize) -> RGB8,
{
    fn color(&self, payload: &[u8], index: usize) -> RGB8 {
        self(payload, index)
    }
}

/// Built-in channel mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mapping {
    /// One byte per pixel, copied to red, green and blue
    #[default]
    Grayscale,
    /// Three bytes per pixel in the given order
    Ordered(ChannelOrder),
}

impl Mapping {
    /// Parse a config name: `"grayscale"`, `"rgb"` or `"grb"`
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("grayscale") {
            Some(Mapping::Grayscale)
        } else {
            ChannelOrder::from_name(name).map(Mapping::Ordered)
        }
    }
}

impl ChannelMapping for Mapping {
    fn color(&self, payload: &[u8], index: usize) -> RGB8 {
        match *self {
            Mapping::Grayscale => match payload.get(index) {
                Some(&level) => RGB8::new(level, level, level),
                None => RGB8::default(),
            },
            Mapping::Ordered(order) => {
                let start = index * BYTES_PER_PIXEL;
                match payload.get(start..start + BYTES_PER_PIXEL) {
                    Some(&[a, b, c]) => order.from_bytes([a, b, c]),
                    _ => RGB8::default(),
                }
            }
        }
    }
}
