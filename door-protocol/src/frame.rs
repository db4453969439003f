//! Frame constants and host-side encoding
//!
//! Frame format:
//! - MARKER (1 byte): `'*'` (0x2A) start-of-frame flag
//! - PAYLOAD (3 × N bytes): one three-byte sample per pixel

/// Start-of-frame flag
pub const FRAME_MARKER: u8 = b'*';

/// Bytes per pixel sample in the payload
pub const BYTES_PER_PIXEL: usize = 3;

/// Errors that can occur while encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload is not a whole number of pixel samples
    PayloadLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Payload size in bytes for a strip of `num_pixels` pixels
pub const fn payload_len(num_pixels: usize) -> usize {
    num_pixels * BYTES_PER_PIXEL
}

/// Size of a complete frame on the wire (marker plus payload)
pub const fn frame_len(num_pixels: usize) -> usize {
    1 + payload_len(num_pixels)
}

/// Encode a frame into `buffer`
///
/// Writes the marker followed by `payload` unchanged. Returns the number
/// of bytes written.
pub fn encode_frame(payload: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    if payload.len() % BYTES_PER_PIXEL != 0 {
        return Err(FrameError::PayloadLength);
    }

    let len = 1 + payload.len();
    if buffer.len() < len {
        return Err(FrameError::BufferTooSmall);
    }

    buffer[0] = FRAME_MARKER;
    buffer[1..len].copy_from_slice(payload);

    Ok(len)
}

/// Count payload bytes that collide with the marker
///
/// Each of these is a point where a receiver hunting for a frame start
/// would falsely sync. Senders can use this to nudge values (e.g. 0x2A to
/// 0x2B) when desync is a concern.
pub fn marker_collisions(payload: &[u8]) -> usize {
    payload.iter().filter(|&&b| b == FRAME_MARKER).count()
}
