//! Frame assembly for the serial command protocol
//!
//! Frame format:
//! - START (1 byte): `#`, restarts framing whenever it is seen
//! - BODY (0-127 bytes): fields separated by `:`
//! - END (1 byte): `%`, completes the frame
//!
//! Framing symbols are never stored in the receive buffer.

use crate::buffer::RxBuffer;

/// Frame start symbol
pub const START_SYMBOL: u8 = b'#';

/// Frame end symbol
pub const END_SYMBOL: u8 = b'%';

/// Field separator inside a frame body
pub const SPLIT_SYMBOL: u8 = b':';

/// Errors that can occur while assembling a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Body exceeded the buffer capacity before an END symbol arrived.
    /// The partial frame has been discarded.
    Overflow,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::Overflow => f.write_str("frame overflow, pending frame discarded"),
        }
    }
}

/// Outcome of feeding one accepted byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedStatus {
    /// Byte arrived outside a frame and was dropped
    Ignored,
    /// START symbol seen, a new frame begins
    Started,
    /// Byte stored in the frame body
    Accepted,
    /// END symbol seen, the body is ready to parse
    Complete,
}

impl FeedStatus {
    /// Check whether a frame body is ready
    pub fn is_complete(self) -> bool {
        self == FeedStatus::Complete
    }
}

/// Assembler states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblerState {
    /// No frame in progress, waiting for START
    #[default]
    Idle,
    /// Accumulating body bytes
    Receiving,
    /// END seen; body held until [`FrameAssembler::clear`]
    Complete,
}

/// State machine turning a byte stream into frame bodies
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    state: AssemblerState,
    buffer: RxBuffer,
}

impl FrameAssembler {
    /// Create an idle assembler
    pub const fn new() -> Self {
        Self {
            state: AssemblerState::Idle,
            buffer: RxBuffer::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> AssemblerState {
        self.state
    }

    /// Current write cursor of the receive buffer
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Check whether the assembler is idle with an empty buffer
    pub fn is_idle(&self) -> bool {
        self.state == AssemblerState::Idle && self.buffer.is_empty()
    }

    /// Discard any frame content and return to idle
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = AssemblerState::Idle;
    }

    /// Body of the completed frame, if one is waiting
    pub fn body(&self) -> Option<&[u8]> {
        match self.state {
            AssemblerState::Complete => Some(self.buffer.as_slice()),
            _ => None,
        }
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Ok(FeedStatus::Complete)` once the END symbol closes a frame;
    /// the body stays available through [`body`](Self::body) until
    /// [`clear`](Self::clear) is called. Returns `Err(FrameError::Overflow)`
    /// when the body outgrows the buffer; the frame is already discarded.
    pub fn feed(&mut self, byte: u8) -> Result<FeedStatus, FrameError> {
        if byte == START_SYMBOL {
            // Resync: a START always begins a fresh frame
            self.buffer.clear();
            self.state = AssemblerState::Receiving;
            return Ok(FeedStatus::Started);
        }

        match self.state {
            AssemblerState::Idle | AssemblerState::Complete => Ok(FeedStatus::Ignored),
            AssemblerState::Receiving => {
                if byte == END_SYMBOL {
                    self.state = AssemblerState::Complete;
                    return Ok(FeedStatus::Complete);
                }

                if self.buffer.push(byte).is_err() {
                    self.clear();
                    return Err(FrameError::Overflow);
                }
                Ok(FeedStatus::Accepted)
            }
        }
    }
}
