//! Byte order of the three channels inside a pixel sample

use smart_leds::RGB8;

/// Order in which a pixel's channels appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// red, green, blue
    #[default]
    Rgb,
    /// green, red, blue (native WS2812 order)
    Grb,
}

impl ChannelOrder {
    /// Serialize a color into a three-byte sample
    pub fn to_bytes(self, color: RGB8) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => [color.r, color.g, color.b],
            ChannelOrder::Grb => [color.g, color.r, color.b],
        }
    }

    /// Interpret a three-byte sample as a color
    pub fn from_bytes(self, sample: [u8; 3]) -> RGB8 {
        match self {
            ChannelOrder::Rgb => RGB8::new(sample[0], sample[1], sample[2]),
            ChannelOrder::Grb => RGB8::new(sample[1], sample[0], sample[2]),
        }
    }

    /// Parse a config name (`"rgb"` / `"grb"`, case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("rgb") {
            Some(ChannelOrder::Rgb)
        } else if name.eq_ignore_ascii_case("grb") {
            Some(ChannelOrder::Grb)
        } else {
            None
        }
    }
}
