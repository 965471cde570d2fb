//! UART adapter
//!
//! Exposes the receive half of the buffered UART as a non-blocking
//! [`UartRx`] so the remote control can drain it from a polling loop.

use embassy_rp::uart::{
    BufferedUartRx, Config as RpUartConfig, DataBits as RpDataBits, Error, Parity as RpParity,
    StopBits as RpStopBits,
};
use embedded_io::{Read, ReadReady};

use robolink_hal::uart::{DataBits, Parity, StopBits};
use robolink_hal::{UartConfig, UartRx};

/// Non-blocking view of the buffered UART receiver
pub struct SerialRx {
    rx: BufferedUartRx,
}

impl SerialRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl UartRx for SerialRx {
    type Error = Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let n = self.rx.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !self.rx.read_ready()? {
            return Ok(0);
        }
        self.rx.read(buf)
    }
}

/// Translate the board-agnostic UART settings into embassy-rp's
pub fn rp_config(config: &UartConfig) -> RpUartConfig {
    let mut rp = RpUartConfig::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    rp
}
