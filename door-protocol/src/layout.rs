//! Matrix to strip wiring
//!
//! The matrix is built from vertical strips chained end to end. Data
//! enters at the bottom of column 0 and snakes:
//!
//! ```text
//! col:   0 1 2 3 ...
//!        ↑ ↓ ↑ ↓
//!        ■ ■ ■ ■        row 0 (top)
//!        ■ ■ ■ ■
//!        . . . .
//!        ■ ■ ■ ■        row height-1 (bottom)
//! ```
//!
//! Even columns run bottom to top, odd columns top to bottom. Positions
//! listed as blanked (e.g. a cut-out around a door handle) have no LED
//! and are skipped without consuming a strip index.

use smart_leds::RGB8;

use crate::frame::{FrameError, BYTES_PER_PIXEL};
use crate::order::ChannelOrder;

/// Physical layout of a column-serpentine LED matrix
#[derive(Debug, Clone, Copy)]
pub struct MatrixLayout<'a> {
    width: usize,
    height: usize,
    blanked: &'a [(usize, usize)],
}

impl MatrixLayout<'static> {
    /// A fully populated `width` × `height` matrix
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blanked: &[],
        }
    }
}

impl<'a> MatrixLayout<'a> {
    /// Mark `(row, col)` positions that have no LED
    pub const fn with_blanked<'b>(self, blanked: &'b [(usize, usize)]) -> MatrixLayout<'b> {
        MatrixLayout {
            width: self.width,
            height: self.height,
            blanked,
        }
    }

    /// Matrix width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn is_blanked(&self, row: usize, col: usize) -> bool {
        self.blanked.contains(&(row, col))
    }

    /// Number of physical LEDs
    pub fn num_pixels(&self) -> usize {
        self.positions().count()
    }

    /// Matrix positions in strip order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width).flat_map(move |col| {
            (0..self.height)
                .map(move |step| {
                    let row = if col % 2 == 0 {
                        self.height - 1 - step
                    } else {
                        step
                    };
                    (row, col)
                })
                .filter(move |&(row, col)| !self.is_blanked(row, col))
        })
    }

    /// Strip index of the LED at `(row, col)`
    ///
    /// Returns `None` for positions outside the matrix or blanked out.
    pub fn strip_index(&self, row: usize, col: usize) -> Option<usize> {
        if !self.in_bounds(row, col) || self.is_blanked(row, col) {
            return None;
        }
        self.positions().position(|pos| pos == (row, col))
    }

    /// Flatten a matrix image into a frame payload
    ///
    /// `pixel(row, col)` supplies the color at each position. Returns the
    /// number of payload bytes written to `out`.
    pub fn encode<F>(&self, order: ChannelOrder, pixel: F, out: &mut [u8]) -> Result<usize, FrameError>
    where
        F: Fn(usize, usize) -> RGB8,
    {
        let len = self.num_pixels() * BYTES_PER_PIXEL;
        if out.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        for ((row, col), chunk) in self
            .positions()
            .zip(out[..len].chunks_exact_mut(BYTES_PER_PIXEL))
        {
            chunk.copy_from_slice(&order.to_bytes(pixel(row, col)));
        }

        Ok(len)
    }
}
