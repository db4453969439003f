//! PIO-based WS2812 strip driver
//!
//! Pixel writes land in a [`DoubleBuffer`]. `show` copies drawing to
//! display and then DMAs the display buffer through the PIO state machine.
//! The WS2812 program handles GRB wire order itself, so colors here are
//! plain RGB.
//!
//! # Architecture
//!
//! The PIO program is loaded once by the caller and handed in as an
//! already-built `PioWs2812`. This driver only owns the pixel memory and
//! decides when a transfer happens; the transfer is driven to completion
//! before `show` returns so the frame loop stays strictly sequential.

use door_core::strip::DoubleBuffer;
use door_core::traits::{StripDriver, StripError};
use embassy_futures::block_on;
use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::PioWs2812;

/// WS2812 strip of `N` LEDs on PIO state machine `S`
pub struct PioStrip<'d, P: Instance, const S: usize, const N: usize> {
    ws: PioWs2812<'d, P, S, N>,
    buffers: DoubleBuffer<N>,
}

impl<'d, P: Instance, const S: usize, const N: usize> PioStrip<'d, P, S, N> {
    /// Wrap a configured PIO WS2812 program
    pub fn new(ws: PioWs2812<'d, P, S, N>) -> Self {
        Self {
            ws,
            buffers: DoubleBuffer::new(),
        }
    }

    /// Pixel memory
    pub fn buffers(&self) -> &DoubleBuffer<N> {
        &self.buffers
    }

    fn push_display(&mut self) {
        block_on(self.ws.write(self.buffers.display()));
    }
}

impl<'d, P: Instance, const S: usize, const N: usize> StripDriver for PioStrip<'d, P, S, N> {
    fn initialize(&mut self) -> Result<(), StripError> {
        self.buffers.initialize()?;
        // Blank whatever the LEDs latched at power-up
        self.push_display();
        Ok(())
    }

    fn set_pixel(&mut self, index: usize, red: u8, green: u8, blue: u8) -> Result<(), StripError> {
        self.buffers.set_pixel(index, red, green, blue)
    }

    fn show(&mut self) -> Result<(), StripError> {
        self.buffers.show()?;
        self.push_display();
        Ok(())
    }

    fn pixel_count(&self) -> usize {
        N
    }
}
