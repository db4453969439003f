//! Scripted serial link for host tests

use std::collections::VecDeque;

use door_hal::{UartRx, UartTx};

/// Simulated line fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    Overrun,
}

#[derive(Debug, Clone, Copy)]
enum Item {
    Byte(u8),
    /// Nothing arrives until after the current read's timeout
    Stall,
    Fault,
}

/// UART receiver fed from a script
///
/// Bytes are delivered in order. A read with timeout stops when the script
/// runs dry or hits a stall, which is how a timeout looks from the caller.
#[derive(Debug, Default)]
pub struct ScriptedUart {
    script: VecDeque<Item>,
    pub timeouts: Vec<u32>,
}

impl ScriptedUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.script.extend(bytes.iter().map(|&b| Item::Byte(b)));
        self
    }

    pub fn frame(self, marker: u8, payload: &[u8]) -> Self {
        self.bytes(&[marker]).bytes(payload)
    }

    pub fn stall(mut self) -> Self {
        self.script.push_back(Item::Stall);
        self
    }

    pub fn fault(mut self) -> Self {
        self.script.push_back(Item::Fault);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script
            .iter()
            .filter(|item| matches!(item, Item::Byte(_)))
            .count()
    }
}

impl UartRx for ScriptedUart {
    type Error = LineFault;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        match self.script.pop_front() {
            Some(Item::Byte(b)) => Ok(Some(b)),
            Some(Item::Stall) | None => Ok(None),
            Some(Item::Fault) => Err(LineFault::Overrun),
        }
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        self.timeouts.push(timeout_ms);

        let mut count = 0;
        while count < buf.len() {
            match self.script.front().copied() {
                Some(Item::Byte(b)) => {
                    self.script.pop_front();
                    buf[count] = b;
                    count += 1;
                }
                Some(Item::Stall) => {
                    self.script.pop_front();
                    break;
                }
                Some(Item::Fault) => {
                    self.script.pop_front();
                    return Err(LineFault::Overrun);
                }
                None => break,
            }
        }
        Ok(count)
    }
}

/// UART transmitter that keeps everything written to it
#[derive(Debug, Default)]
pub struct RecordingTx {
    pub written: Vec<u8>,
    pub flushes: usize,
}

impl RecordingTx {
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.written).unwrap()
    }
}

impl UartTx for RecordingTx {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}
