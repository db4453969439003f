//! Frame receive/render task
//!
//! Runs the frame loop forever. Each pass handles at most one frame; when
//! the link is quiet the task yields so the executor can run anything
//! else that is pending.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::peripherals::PIO0;

use door_core::status;
use door_core::{FrameLoop, FrameOutcome, Mapping};
use door_hal_rp2040::{PioStrip, SerialRx, SerialTx};

use crate::config::{NUM_PIXELS, STRIP};

/// Frame loop wired to the RP2040 UART and PIO strip
pub type DoorLoop =
    FrameLoop<SerialRx, PioStrip<'static, PIO0, 0, NUM_PIXELS>, Mapping, NUM_PIXELS>;

/// Frame task - syncs on markers and latches complete frames
#[embassy_executor::task]
pub async fn frame_task(mut frames: DoorLoop, mut status_tx: SerialTx) {
    info!("Frame task started");

    let payload_len = frames.payload_len();
    let mut committed: u32 = 0;

    loop {
        let outcome = match frames.step() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Strip error: {:?}", e);
                continue;
            }
        };

        match outcome {
            FrameOutcome::Idle => {
                yield_now().await;
                continue;
            }
            FrameOutcome::Skipped(byte) => {
                trace!("Skipped byte {=u8:#x} outside frame", byte);
            }
            FrameOutcome::Committed => {
                committed = committed.wrapping_add(1);
                debug!("Frame {} committed", committed);
            }
            FrameOutcome::Discarded { received } => {
                warn!("Incomplete frame: {}/{} bytes, keeping last frame", received, payload_len);
            }
            FrameOutcome::LineError(e) => {
                warn!("UART error: {:?}", e);
            }
        }

        if STRIP.echo_status && status::report(&mut status_tx, &outcome, payload_len).is_err() {
            warn!("Failed to write status line");
        }
    }
}
