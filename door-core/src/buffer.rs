//! Drawing buffer filled by the frame receiver
//!
//! Holds one payload's worth of pixel samples. The receiver writes it as a
//! flat byte slice; the renderer reads it back as the same bytes. Both
//! views come from the same owned array, so there is no aliasing between a
//! typed and a raw view.

use door_protocol::BYTES_PER_PIXEL;

/// Staging memory for one frame payload of `N` pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingBuffer<const N: usize> {
    samples: [[u8; BYTES_PER_PIXEL]; N],
}

impl<const N: usize> Default for DrawingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DrawingBuffer<N> {
    /// Zeroed buffer
    pub const fn new() -> Self {
        Self {
            samples: [[0; BYTES_PER_PIXEL]; N],
        }
    }

    /// Number of pixel slots
    pub const fn num_pixels(&self) -> usize {
        N
    }

    /// Size of the byte view (3 × N)
    pub const fn len_bytes(&self) -> usize {
        N * BYTES_PER_PIXEL
    }

    /// The whole buffer as payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.samples.as_flattened()
    }

    /// Mutable payload bytes, for the receiver to fill
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.samples.as_flattened_mut()
    }

    /// Raw three-byte sample of pixel `index`
    pub fn sample(&self, index: usize) -> Option<[u8; BYTES_PER_PIXEL]> {
        self.samples.get(index).copied()
    }

    /// Zero every byte
    pub fn clear(&mut self) {
        self.samples = [[0; BYTES_PER_PIXEL]; N];
    }
}
