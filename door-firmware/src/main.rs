//! Door Display - LED Matrix Firmware
//!
//! Main firmware binary for RP2040-based LED matrix controllers.
//! A host streams `'*'` + 3×N pixel bytes over UART; complete frames are
//! latched to a WS2812 strip driven by PIO, incomplete ones are dropped.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use door_core::status::{self, StatusLine};
use door_core::FrameLoop;
use door_hal_rp2040::{PioStrip, SerialRx, SerialTx};

use crate::config::{NUM_PIXELS, RX_BUF_SIZE, STRIP, TX_BUF_SIZE};

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; TX_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; RX_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Door display firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    unwrap!(STRIP.validate());
    info!(
        "Strip config: {} pixels, marker {=u8:#x}, {} baud, {} ms timeout, mapping {}",
        STRIP.num_pixels,
        STRIP.marker,
        STRIP.uart.baudrate,
        STRIP.uart.read_timeout_ms,
        STRIP.mapping
    );

    // Setup UART for the frame link
    // Pin assignments are board-specific (Pico: TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = STRIP.uart.baudrate;

    let tx_buf = TX_BUF.init([0u8; TX_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; RX_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    let mut status_tx = SerialTx::new(tx);
    if STRIP.echo_status {
        status::write_line(&mut status_tx, StatusLine::Starting).ok();
    }

    info!("UART initialized for frame link");

    // Setup PIO0 for the WS2812 data line
    // Pin assignment is board-specific (data on GPIO16)
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    let strip = PioStrip::<'static, PIO0, 0, NUM_PIXELS>::new(ws2812);

    info!("PIO WS2812 initialized");

    let mut frames = unwrap!(FrameLoop::new(
        SerialRx::new(rx),
        strip,
        STRIP.mapping,
        &STRIP
    ));

    // Known visual state before the first frame
    unwrap!(frames.initialize());
    if STRIP.echo_status {
        status::write_line(&mut status_tx, StatusLine::IdleFill).ok();
    }
    info!(
        "All LEDs set to idle color ({}, {}, {})",
        STRIP.idle_color.r, STRIP.idle_color.g, STRIP.idle_color.b
    );

    unwrap!(spawner.spawn(tasks::frame_task(frames, status_tx)));

    info!("Frame task spawned, firmware running");

    // Main task has nothing else to do - all work happens in the frame task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
