//! Inter-task communication channels
//!
//! The remote task produces timeline commands, the servo task consumes them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use robolink_core::config::RemoteConfig;
use robolink_protocol::{Command, MIN_FRAME_LEN};

/// Channel capacity for timeline commands
///
/// Holds every frame one remote poll can complete. The servo task drains
/// the channel as soon as a command lands, so it never has to buffer more
/// than one poll's worth.
pub const TIMELINE_CHANNEL_SIZE: usize =
    (RemoteConfig::DEFAULT_MAX_BYTES_PER_POLL as usize).div_ceil(MIN_FRAME_LEN);

/// Commands parsed from the serial link, waiting for the servo task
pub static TIMELINE_CMD: Channel<CriticalSectionRawMutex, Command, TIMELINE_CHANNEL_SIZE> =
    Channel::new();

