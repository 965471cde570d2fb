//! Remote control driver
//!
//! Polls the UART, assembles frames, and dispatches parsed commands to the
//! timeline. Every call does a bounded amount of work and never blocks, so
//! it can sit in a cooperative control loop next to the motion code.
//!
//! ```text
//! UART bytes ─► FrameAssembler ─► frame body ─► Command::parse ─► dispatch ─► Timeline
//! ```
//!
//! Errors never stop the loop: an overflowed or malformed frame is dropped,
//! counted in [`LinkStats`], and the assembler returns to idle.

use robolink_hal::UartRx;
use robolink_protocol::{Command, CommandError, CommandId, FeedStatus, FrameAssembler, FrameError};

use crate::config::RemoteConfig;
use crate::dispatch::dispatch;
use crate::stats::LinkStats;
use crate::traits::Timeline;

/// Errors reported while processing a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteError {
    /// Frame assembly failed (overflow)
    Frame(FrameError),
    /// A complete frame was rejected by the parser
    Command(CommandError),
}

impl From<FrameError> for RemoteError {
    fn from(e: FrameError) -> Self {
        RemoteError::Frame(e)
    }
}

impl From<CommandError> for RemoteError {
    fn from(e: CommandError) -> Self {
        RemoteError::Command(e)
    }
}

impl core::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RemoteError::Frame(e) => write!(f, "{}", e),
            RemoteError::Command(e) => write!(f, "{}", e),
        }
    }
}

/// Serial remote control bound to one timeline
///
/// The timeline is borrowed for the whole lifetime of the driver; the
/// driver only ever calls [`Timeline`] operations on it.
pub struct RemoteControl<'t, T: Timeline, R: UartRx> {
    timeline: &'t mut T,
    uart: R,
    assembler: FrameAssembler,
    config: RemoteConfig,
    stats: LinkStats,
}

impl<'t, T: Timeline, R: UartRx> RemoteControl<'t, T, R> {
    /// Create a driver
    ///
    /// The UART must already be initialized.
    pub fn new(timeline: &'t mut T, uart: R, config: RemoteConfig) -> Self {
        Self {
            timeline,
            uart,
            assembler: FrameAssembler::new(),
            config,
            stats: LinkStats::default(),
        }
    }

    /// One polling pass: serial processing plus link bookkeeping
    ///
    /// Returns the number of frames dispatched during this pass.
    pub fn update(&mut self, now_ms: u32) -> usize {
        let dispatched = self.update_serial();
        if dispatched > 0 {
            self.stats.mark_frame(now_ms);
        }
        self.stats.refresh(now_ms, self.config.link_timeout_ms);
        dispatched
    }

    /// Serial polling pass
    ///
    /// Drains the bytes the UART has available right now, up to
    /// `max_bytes_per_poll`, dispatching every frame that completes.
    /// Returns the number of frames dispatched.
    pub fn update_serial(&mut self) -> usize {
        let mut dispatched = 0;

        for _ in 0..self.config.max_bytes_per_poll {
            let byte = match self.uart.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("UART read error");
                    break;
                }
            };
            self.stats.bytes_received = self.stats.bytes_received.wrapping_add(1);

            match self.process_byte(byte) {
                Ok(Some(_id)) => {
                    dispatched += 1;
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Dispatched {:?}", _id);
                }
                Ok(None) => {}
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Dropped frame: {:?}", _e);
                }
            }
        }

        dispatched
    }

    /// Feed one byte and dispatch the frame it completes, if any
    ///
    /// Returns the identifier of the dispatched command when the byte was an
    /// END symbol closing a valid frame. The receive buffer is cleared after
    /// every complete frame, whether it parsed or not.
    pub fn process_byte(&mut self, byte: u8) -> Result<Option<CommandId>, RemoteError> {
        let status = self.add_char_to_rx_buffer(byte)?;
        if !status.is_complete() {
            return Ok(None);
        }

        let result = match self.assembler.body() {
            Some(body) => execute(&mut *self.timeline, body),
            None => Err(CommandError::MalformedFrame),
        };
        self.clear_rx_buffer();

        match result {
            Ok(id) => {
                self.stats.frames_dispatched = self.stats.frames_dispatched.wrapping_add(1);
                Ok(Some(id))
            }
            Err(e) => {
                self.stats.frames_rejected = self.stats.frames_rejected.wrapping_add(1);
                Err(e.into())
            }
        }
    }

    /// Add one byte to the receive buffer
    ///
    /// `Ok` means the byte was taken (or harmlessly ignored outside a frame);
    /// `Ok(FeedStatus::Complete)` means a frame body is ready.
    /// `Err(FrameError::Overflow)` means the pending frame was discarded.
    pub fn add_char_to_rx_buffer(&mut self, byte: u8) -> Result<FeedStatus, FrameError> {
        let result = self.assembler.feed(byte);
        if result.is_err() {
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
        }
        result
    }

    /// Discard any buffered frame content
    pub fn clear_rx_buffer(&mut self) {
        self.assembler.clear();
    }

    /// Parse a frame body and dispatch it to the timeline
    ///
    /// Either every argument validates and exactly one timeline operation
    /// runs, or nothing runs and the error is returned.
    pub fn handle_command(&mut self, body: &[u8]) -> Result<CommandId, CommandError> {
        execute(&mut *self.timeline, body)
    }

    /// Link counters
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Driver settings
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Check whether no frame is being assembled
    pub fn is_idle(&self) -> bool {
        self.assembler.is_idle()
    }

    /// Current receive buffer cursor
    pub fn rx_cursor(&self) -> usize {
        self.assembler.cursor()
    }
}

fn execute<T: Timeline>(timeline: &mut T, body: &[u8]) -> Result<CommandId, CommandError> {
    let command = Command::parse(body)?;
    let id = command.id();
    dispatch(timeline, command);
    Ok(id)
}
